//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): generate requests by response status
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency
//! - `gateway_upstream_requests_total` (counter): upstream calls by outcome
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so tests and metric-less deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished generate request.
pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("gateway_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one upstream call.
pub fn record_upstream(outcome: &'static str, start: Instant) {
    metrics::counter!("gateway_upstream_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("gateway_upstream_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
