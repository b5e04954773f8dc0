use crate::error::{DiashowError, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Writes `slides` as a pretty-printed JSON array, replacing any previous file.
///
/// Non-ASCII characters are written as-is rather than `\u` escaped.
pub fn save(slides: &[String], path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(slides)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| DiashowError::SlidesWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(path, content).map_err(|source| DiashowError::SlidesWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} slides to {}", slides.len(), path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
