//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.json
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → ModeConfig (validated, immutable)
//!     → shared via Arc with every request handler
//!
//! command line
//!     → GatewayConfig (listener, upstream, observability)
//!     → validation.rs
//! ```
//!
//! # Design Decisions
//! - Config is loaded once before the listener binds; there is no reload
//! - Any load or validation failure aborts startup
//! - Runtime settings have defaults so a bare invocation works

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_modes, ConfigError, DEFAULT_CONFIG_PATH};
pub use schema::{GatewayConfig, ListenerConfig, ModeConfig, ObservabilityConfig, Profile, UpstreamConfig};
