//! Text-generation gateway.
//!
//! Resolves a named mode into a settings profile, applies per-request
//! overrides and limits, and forwards the request to an Ollama-style
//! generate endpoint.
//!
//! ```text
//!     Client                 ┌──────────────────────────────────────────┐
//!     POST /generate ───────▶│ limits ─▶ settings resolver ─▶ upstream  │──▶ Ollama
//!                            │   │            │                  │      │
//!     { response } ◀─────────│◀──┴────────────┴── GatewayError ◀─┘      │◀──
//!                            └──────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use generate_gateway::config::validation::validate_gateway;
use generate_gateway::config::{load_modes, GatewayConfig, DEFAULT_CONFIG_PATH};
use generate_gateway::lifecycle::{signals, Shutdown};
use generate_gateway::observability::{logging, metrics};
use generate_gateway::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "generate-gateway", version)]
#[command(about = "Mode-based settings gateway for a text-generation service", long_about = None)]
struct Args {
    /// Path to the JSON mode file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Address to listen on.
    #[arg(short, long, default_value = "0.0.0.0:8434")]
    bind: String,

    /// Upstream generate endpoint.
    #[arg(long, default_value = "http://localhost:11434/generate")]
    upstream_url: String,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Serve Prometheus metrics on this address.
    #[arg(long)]
    metrics_address: Option<String>,
}

impl Args {
    fn into_config(self) -> (PathBuf, GatewayConfig) {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = self.bind;
        config.upstream.url = self.upstream_url;
        config.observability.log_level = self.log_level;
        config.observability.metrics_address = self.metrics_address;
        (self.config, config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config_path, config) = Args::parse().into_config();

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!("generate-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(errors) = validate_gateway(&config) {
        for e in &errors {
            tracing::error!(error = %e, "Invalid gateway settings");
        }
        return Err(format!("{} invalid gateway setting(s)", errors.len()).into());
    }

    let modes = load_modes(&config_path).map_err(|e| {
        tracing::error!(path = %config_path.display(), error = %e, "Failed to load mode file");
        e
    })?;

    tracing::info!(
        path = %config_path.display(),
        modes = modes.modes.len(),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if let Some(address) = &config.observability.metrics_address {
        let addr: SocketAddr = address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, modes)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
