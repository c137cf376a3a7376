//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RelayConfig, ConfigError> {
    let config: RelayConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load a TOML file on top of `base` and validate the result.
pub fn load_config_over(path: &Path, base: &RelayConfig) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config_over(&content, base)
}

/// Parse TOML text on top of `base`.
///
/// Tables merge key by key; any other value in the file (including the
/// `routes` array) replaces the base value outright.
pub fn parse_config_over(content: &str, base: &RelayConfig) -> Result<RelayConfig, ConfigError> {
    let overlay: toml::Table = toml::from_str(content)?;
    let mut merged = toml::Table::try_from(base)?;
    merge_tables(&mut merged, overlay);

    let config: RelayConfig = merged.try_into()?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
