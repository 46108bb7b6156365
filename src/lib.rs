//! Configuration-driven text-generation gateway library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;
pub mod settings;
pub mod upstream;

pub use config::{GatewayConfig, ModeConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
