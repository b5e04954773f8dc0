use crate::error::{DiashowError, Result};
use crate::playlist::Order;
use log::debug;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "DIASHOW_CONFIG";
pub const CONFIG_EXTENSION: &str = "toml";

/// On-disk shape of the config file. The first four keys are required.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    negative: String,
    extensions: Vec<String>,
    shuffled: bool,
    slidesfile: String,
    #[serde(default = "default_search_tool")]
    search_tool: String,
    #[serde(default = "default_search_timeout_secs")]
    search_timeout_secs: u64,
}

fn default_search_tool() -> String {
    "mdfind".to_string()
}
fn default_search_timeout_secs() -> u64 {
    60
}

/// Validated configuration. Extensions are lowercase and carry the leading dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub negative: String,
    pub extensions: BTreeSet<String>,
    pub shuffled: bool,
    pub slidesfile: PathBuf,
    pub search_tool: String,
    pub search_timeout: Duration,
}

impl Config {
    /// Config file that sits next to `program` with the same base name.
    pub fn path_for(program: &Path) -> PathBuf {
        program.with_extension(CONFIG_EXTENSION)
    }

    /// Resolves the config location: `$DIASHOW_CONFIG`, else the sibling of
    /// the running executable.
    pub fn locate() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let exe = env::current_exe()?;
        Ok(Self::path_for(&exe))
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading config file: {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| DiashowError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parses and validates `content`; `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|source| DiashowError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::validate(file)
    }

    fn validate(file: ConfigFile) -> Result<Self> {
        if file.extensions.is_empty() {
            return Err(DiashowError::Config(
                "`extensions` must list at least one extension".to_string(),
            ));
        }
        let mut extensions = BTreeSet::new();
        for ext in &file.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(DiashowError::Config(format!(
                    "extension {ext:?} must start with '.' followed by a name, e.g. \".jpg\""
                )));
            }
            extensions.insert(ext.to_ascii_lowercase());
        }

        if file.slidesfile.trim().is_empty() {
            return Err(DiashowError::Config(
                "`slidesfile` must not be empty".to_string(),
            ));
        }
        if file.search_tool.trim().is_empty() {
            return Err(DiashowError::Config(
                "`search_tool` must not be empty".to_string(),
            ));
        }
        if file.search_timeout_secs == 0 {
            return Err(DiashowError::Config(
                "`search_timeout_secs` must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            negative: file.negative,
            extensions,
            shuffled: file.shuffled,
            slidesfile: expand_home(&file.slidesfile)?,
            search_tool: file.search_tool,
            search_timeout: Duration::from_secs(file.search_timeout_secs),
        })
    }

    pub fn order(&self) -> Order {
        if self.shuffled {
            Order::Shuffled
        } else {
            Order::Sorted
        }
    }
}

fn expand_home(raw: &str) -> Result<PathBuf> {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or_else(|| {
                DiashowError::Config(format!("cannot expand {raw:?}: no home directory"))
            }),
        None => Ok(PathBuf::from(raw)),
    }
}
