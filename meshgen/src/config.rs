//! Generator configuration (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Division number used when none (or a negative one) is configured
pub const DEFAULT_DIVISION_NUMBER: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings shared by every generation call of one `MeshGenerator`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Tessellation resolution; negative values select the default
    #[serde(default = "default_division_number")]
    pub division_number: i32,
    #[serde(default = "default_true")]
    pub normal_generation: bool,
    #[serde(default = "default_true")]
    pub bounding_box_update: bool,
}

fn default_division_number() -> i32 { DEFAULT_DIVISION_NUMBER as i32 }
fn default_true() -> bool { true }

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            division_number: default_division_number(),
            normal_generation: true,
            bounding_box_update: true,
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Division number with negative values mapped to the default
    pub fn effective_division_number(&self) -> usize {
        usize::try_from(self.division_number).unwrap_or(DEFAULT_DIVISION_NUMBER)
    }
}
