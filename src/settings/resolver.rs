//! Settings resolution.
//!
//! Picks the base profile (named mode or default), applies request overrides
//! key by key, then clamps `max_length` to [`GLOBAL_MAX_LENGTH`].

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::{ModeConfig, Profile};
use crate::security::limits::GLOBAL_MAX_LENGTH;

/// The one setting the gateway interprets.
pub const MAX_LENGTH_KEY: &str = "max_length";

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("mode '{0}' is not configured")]
    ModeNotFound(String),

    #[error("max_length must be a number, got {0}")]
    InvalidMaxLength(Value),
}

/// Resolve the settings for one request.
///
/// An empty mode name selects the default profile, same as no mode at all.
/// Overrides replace whole values; nested objects are not merged.
pub fn resolve(
    config: &ModeConfig,
    mode: Option<&str>,
    overrides: Option<&Profile>,
) -> Result<Profile, ResolveError> {
    let mut settings = match mode.filter(|m| !m.is_empty()) {
        Some(name) => config
            .mode(name)
            .cloned()
            .ok_or_else(|| ResolveError::ModeNotFound(name.to_string()))?,
        None => config.default.clone(),
    };

    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            settings.insert(key.clone(), value.clone());
        }
    }

    let max_length = match settings.get(MAX_LENGTH_KEY) {
        Some(value) => clamp_max_length(value)?,
        None => Value::from(GLOBAL_MAX_LENGTH),
    };
    settings.insert(MAX_LENGTH_KEY.to_string(), max_length);

    Ok(settings)
}

/// `min(value, GLOBAL_MAX_LENGTH)`, keeping the caller's value (and its
/// integer or float form) when it is at or below the limit.
fn clamp_max_length(value: &Value) -> Result<Value, ResolveError> {
    let Value::Number(n) = value else {
        return Err(ResolveError::InvalidMaxLength(value.clone()));
    };

    let within_limit = if let Some(i) = n.as_i64() {
        i <= GLOBAL_MAX_LENGTH as i64
    } else if n.is_u64() {
        false
    } else {
        n.as_f64().is_some_and(|f| f <= GLOBAL_MAX_LENGTH as f64)
    };

    if within_limit {
        Ok(value.clone())
    } else {
        Ok(Value::from(GLOBAL_MAX_LENGTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ModeConfig {
        serde_json::from_value(json!({
            "default": { "max_length": 200 },
            "modes": { "fast": { "max_length": 100, "temp": 0.2 } }
        }))
        .unwrap()
    }

    fn profile(value: Value) -> Profile {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_no_mode_uses_default() {
        let settings = resolve(&config(), None, None).unwrap();
        assert_eq!(Value::Object(settings), json!({ "max_length": 200 }));
    }

    #[test]
    fn test_empty_mode_uses_default() {
        let settings = resolve(&config(), Some(""), None).unwrap();
        assert_eq!(Value::Object(settings), json!({ "max_length": 200 }));
    }

    #[test]
    fn test_mode_with_override() {
        let overrides = profile(json!({ "temp": 0.9 }));
        let settings = resolve(&config(), Some("fast"), Some(&overrides)).unwrap();
        assert_eq!(Value::Object(settings), json!({ "max_length": 100, "temp": 0.9 }));
    }

    #[test]
    fn test_unknown_mode() {
        let err = resolve(&config(), Some("slow"), None).unwrap_err();
        assert_eq!(err, ResolveError::ModeNotFound("slow".into()));
    }

    #[test]
    fn test_override_is_clamped() {
        let overrides = profile(json!({ "max_length": 9999 }));
        let settings = resolve(&config(), None, Some(&overrides)).unwrap();
        assert_eq!(settings[MAX_LENGTH_KEY], json!(500));
    }

    #[test]
    fn test_missing_max_length_is_injected() {
        let config: ModeConfig =
            serde_json::from_value(json!({ "default": { "temp": 0.5 } })).unwrap();
        let settings = resolve(&config, None, None).unwrap();
        assert_eq!(Value::Object(settings), json!({ "temp": 0.5, "max_length": 500 }));
    }

    #[test]
    fn test_clamp_number_forms() {
        assert_eq!(clamp_max_length(&json!(499)).unwrap(), json!(499));
        assert_eq!(clamp_max_length(&json!(500)).unwrap(), json!(500));
        assert_eq!(clamp_max_length(&json!(-3)).unwrap(), json!(-3));
        assert_eq!(clamp_max_length(&json!(120.5)).unwrap(), json!(120.5));
        assert_eq!(clamp_max_length(&json!(500.0)).unwrap(), json!(500.0));
        assert_eq!(clamp_max_length(&json!(500.1)).unwrap(), json!(500));
        assert_eq!(clamp_max_length(&json!(u64::MAX)).unwrap(), json!(500));
    }

    #[test]
    fn test_non_numeric_max_length_rejected() {
        for bad in [json!("100"), json!(true), json!(null), json!({ "n": 1 })] {
            let overrides = profile(json!({ "max_length": bad.clone() }));
            let err = resolve(&config(), None, Some(&overrides)).unwrap_err();
            assert_eq!(err, ResolveError::InvalidMaxLength(bad));
        }
    }

    #[test]
    fn test_nested_override_replaces_whole_value() {
        let config: ModeConfig = serde_json::from_value(json!({
            "default": { "options": { "top_k": 40, "top_p": 0.9 } }
        }))
        .unwrap();
        let overrides = profile(json!({ "options": { "top_k": 5 } }));

        let settings = resolve(&config, None, Some(&overrides)).unwrap();
        assert_eq!(settings["options"], json!({ "top_k": 5 }));
    }

    #[test]
    fn test_resolution_does_not_touch_config() {
        let config = config();
        let before = config.clone();
        let overrides = profile(json!({ "temp": 1.5, "max_length": 10 }));

        let first = resolve(&config, Some("fast"), Some(&overrides)).unwrap();
        let second = resolve(&config, Some("fast"), Some(&overrides)).unwrap();

        assert_eq!(first, second);
        assert_eq!(config, before);
    }
}
