use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiashowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML error: failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("TOML error: failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to launch search tool '{program}': {source}")]
    SearchSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Search tool '{program}' failed ({status}): {stderr}")]
    SearchFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Search tool '{program}' did not finish within {timeout:?}")]
    SearchTimeout { program: String, timeout: Duration },

    #[error("Failed to serialize slides: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write slides file '{path}': {source}")]
    SlidesWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no image files found.")]
    NoImagesFound { results: usize },

    #[error("An unexpected error occurred: {0}")]
    Other(String),
}

impl DiashowError {
    /// Process exit status for this error. Values follow `sysexits.h`.
    pub fn exit_code(&self) -> u8 {
        match self {
            DiashowError::NoImagesFound { .. } => 1,
            DiashowError::ConfigRead { .. }
            | DiashowError::ConfigParse { .. }
            | DiashowError::Config(_) => 78,
            DiashowError::SearchSpawn { .. }
            | DiashowError::SearchFailed { .. }
            | DiashowError::SearchTimeout { .. } => 69,
            DiashowError::Io(_) | DiashowError::Json(_) | DiashowError::SlidesWrite { .. } => 74,
            DiashowError::Other(_) => 70,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiashowError>;
