//! Gateway error translation.
//!
//! Every request-path failure ends up here and is rendered as
//! `{ "detail": ... }` with a fixed status. Upstream details stay in the
//! logs and never reach the client.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::http::response::ErrorBody;
use crate::security::limits::LimitError;
use crate::settings::ResolveError;
use crate::upstream::UpstreamError;

pub const INPUT_TOO_LONG: &str = "Input text too long";
pub const MODE_NOT_FOUND: &str = "Mode not found";
pub const INVALID_MAX_LENGTH: &str = "Invalid max_length setting";
pub const UPSTREAM_FAILED: &str = "Error communicating with Ollama";
pub const UPSTREAM_TIMED_OUT: &str = "Request to Ollama timed out";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request body: {detail}")]
    InvalidBody { status: StatusCode, detail: String },

    #[error(transparent)]
    Limit(#[from] LimitError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidBody { status, .. } => *status,
            GatewayError::Limit(_) | GatewayError::Resolve(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message.
    pub fn detail(&self) -> String {
        match self {
            GatewayError::InvalidBody { detail, .. } => detail.clone(),
            GatewayError::Limit(_) => INPUT_TOO_LONG.to_string(),
            GatewayError::Resolve(ResolveError::ModeNotFound(_)) => MODE_NOT_FOUND.to_string(),
            GatewayError::Resolve(ResolveError::InvalidMaxLength(_)) => INVALID_MAX_LENGTH.to_string(),
            GatewayError::Upstream(UpstreamError::Timeout(_)) => UPSTREAM_TIMED_OUT.to_string(),
            GatewayError::Upstream(_) => UPSTREAM_FAILED.to_string(),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        // Only a body-length overrun buffers into a 413; the text inside it
        // is necessarily over the input limit too.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return GatewayError::Limit(LimitError::BodyTooLarge);
        }
        GatewayError::InvalidBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { detail: self.detail() })).into_response()
    }
}
