//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every `max_length` in the mode file must be numeric
//! - Runtime settings must be usable (parseable bind address, http(s) upstream URL, non-zero timeout)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the config value
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::{GatewayConfig, ModeConfig, Profile};
use crate::settings::MAX_LENGTH_KEY;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the mode file.
pub fn validate_modes(config: &ModeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_profile("default", &config.default, &mut errors);

    let mut names: Vec<&String> = config.modes.keys().collect();
    names.sort();
    for name in names {
        if name.is_empty() {
            errors.push(ValidationError::new("modes", "mode name must not be empty"));
        }
        check_profile(&format!("modes.{}", name), &config.modes[name], &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_profile(path: &str, profile: &Profile, errors: &mut Vec<ValidationError>) {
    if let Some(value) = profile.get(MAX_LENGTH_KEY) {
        if !value.is_number() {
            errors.push(ValidationError::new(
                format!("{}.{}", path, MAX_LENGTH_KEY),
                format!("must be a number, got {}", value),
            ));
        }
    }
}

/// Validate runtime settings.
pub fn validate_gateway(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("invalid socket address '{}'", config.listener.bind_address),
        ));
    }

    match url::Url::parse(&config.upstream.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "upstream.url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("upstream.url", e.to_string())),
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.timeout_secs", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn modes(value: serde_json::Value) -> ModeConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_modes() {
        let config = modes(json!({
            "default": { "max_length": 200 },
            "modes": { "fast": { "max_length": 100.5, "temp": 0.2 }, "plain": {} }
        }));
        assert!(validate_modes(&config).is_ok());
    }

    #[test]
    fn test_non_numeric_max_length_reported_per_profile() {
        let config = modes(json!({
            "default": { "max_length": "long" },
            "modes": { "fast": { "max_length": null } }
        }));
        let errors = validate_modes(&config).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "default.max_length");
        assert_eq!(errors[1].field, "modes.fast.max_length");
    }

    #[test]
    fn test_gateway_defaults_are_valid() {
        assert!(validate_gateway(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_gateway_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.upstream.url = "ftp://localhost/generate".into();
        config.upstream.timeout_secs = 0;

        let errors = validate_gateway(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["listener.bind_address", "upstream.url", "upstream.timeout_secs"]
        );
    }
}
