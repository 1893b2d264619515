//! Configuration loading from TOML files
//!
//! Armor profiles, falloff profiles and tuning constants are authored as
//! static data and handed to the pipeline already deserialized. Nothing in
//! here is consulted at resolution time.

mod constants;

pub use constants::{
    BallisticsConstants, CombatConstants, PenetrationConstants, TraversalConstants,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("configuration validation error: {0}")]
    Validation(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Parse a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_error_is_reported() {
        let result: Result<CombatConstants, _> = parse_toml("not [valid toml");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
