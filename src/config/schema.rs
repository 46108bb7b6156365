//! Configuration schema definitions.
//!
//! Two kinds of configuration live here:
//! - [`ModeConfig`]: the mode file (default profile plus named modes),
//!   deserialized from JSON at startup.
//! - [`GatewayConfig`]: runtime settings for the listener, the upstream
//!   service and observability. Built from defaults and command-line flags.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::security::limits::TIMEOUT;

/// A generation settings profile.
///
/// Open-ended, ordered mapping of option name to JSON value. Only
/// `max_length` has a meaning to the gateway; everything else is passed
/// through to the upstream service untouched.
pub type Profile = Map<String, Value>;

/// Mode file contents.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ModeConfig {
    /// Profile used when a request names no mode.
    pub default: Profile,

    /// Named profiles selectable through the request `mode` field.
    #[serde(default)]
    pub modes: HashMap<String, Profile>,
}

impl ModeConfig {
    /// Look up a named mode profile.
    pub fn mode(&self, name: &str) -> Option<&Profile> {
        self.modes.get(name)
    }
}

/// Root runtime configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Downstream text-generation service.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8434").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8434".to_string(),
            max_body_size: 64 * 1024,
        }
    }
}

/// Upstream service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL of the generate endpoint.
    pub url: String,

    /// Deadline for a single upstream call in seconds.
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434/generate".to_string(),
            timeout_secs: TIMEOUT.as_secs(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus scrape address. Metrics export is off when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
