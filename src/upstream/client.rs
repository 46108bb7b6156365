//! HTTP client for the downstream text-generation service.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::config::schema::{Profile, UpstreamConfig};
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;

/// Field of the upstream success body that carries the generated text.
pub const TEXT_FIELD: &str = "text";

/// Failures of a single upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),

    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed upstream response: {0}")]
    MalformedBody(String),
}

impl UpstreamError {
    /// Label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::Client(_) => "client",
            UpstreamError::Status(_) => "status",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::MalformedBody(_) => "malformed",
        }
    }

    fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(timeout)
        } else if let Some(status) = err.status() {
            UpstreamError::Status(status)
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// Client bound to one upstream generate endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            url: config.url.clone(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one generate request and return the generated text.
    ///
    /// Exactly one attempt is made. The deadline covers connecting, sending
    /// and reading the whole response body.
    pub async fn forward(&self, text: &str, settings: Profile) -> Result<String, UpstreamError> {
        let start = Instant::now();
        let payload = build_payload(text, settings);

        let result = match with_deadline(self.timeout, self.send(&payload)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.timeout)),
        };

        match &result {
            Ok(_) => {
                tracing::debug!(url = %self.url, elapsed = ?start.elapsed(), "Upstream call succeeded");
                metrics::record_upstream("ok", start);
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, outcome = e.outcome(), "Upstream call failed");
                metrics::record_upstream(e.outcome(), start);
            }
        }

        result
    }

    async fn send(&self, payload: &Profile) -> Result<String, UpstreamError> {
        let response = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, self.timeout))?;

        extract_text(&body)
    }
}

/// `{ "prompt": text }` with every resolved setting laid over it.
pub fn build_payload(text: &str, settings: Profile) -> Profile {
    let mut payload = Profile::new();
    payload.insert("prompt".to_string(), Value::String(text.to_string()));
    payload.extend(settings);
    payload
}

/// Pull the generated text out of an upstream success body.
fn extract_text(body: &[u8]) -> Result<String, UpstreamError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| UpstreamError::MalformedBody(format!("invalid JSON: {}", e)))?;

    match value.get(TEXT_FIELD) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(UpstreamError::MalformedBody(format!(
            "'{}' is not a string: {}",
            TEXT_FIELD, other
        ))),
        None => Err(UpstreamError::MalformedBody(format!("missing '{}' field", TEXT_FIELD))),
    }
}
