//! Shape descriptions read from disk

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Parse `path` as JSON if it has a `.json` extension, TOML otherwise
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))
    } else {
        toml::from_str(&content).with_context(|| format!("Failed to parse TOML: {}", path.display()))
    }
}
