//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ModeConfig;
use crate::config::validation::{validate_modes, ValidationError};

/// Default location of the mode file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found or unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate the mode file.
pub fn load_modes(path: &Path) -> Result<ModeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_modes(&content)
}

/// Parse and validate mode file contents.
pub fn parse_modes(content: &str) -> Result<ModeConfig, ConfigError> {
    let config: ModeConfig = serde_json::from_str(content)?;
    validate_modes(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
