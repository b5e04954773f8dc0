use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Removes every entry of `negative` from `positive`, keeping the order of
/// `positive`. Comparison is exact string equality.
pub fn subtract(positive: Vec<String>, negative: &[String]) -> Vec<String> {
    let excluded: HashSet<&str> = negative.iter().map(String::as_str).collect();
    positive
        .into_iter()
        .filter(|path| !excluded.contains(path.as_str()))
        .collect()
}

/// Lowercased extension of the final path component, with its leading dot.
pub fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

pub fn keep_extensions(paths: Vec<String>, extensions: &BTreeSet<String>) -> Vec<String> {
    paths
        .into_iter()
        .filter(|path| {
            extension_of(path)
                .map(|ext| extensions.contains(&ext))
                .unwrap_or(false)
        })
        .collect()
}
