//! Request handlers.
//!
//! `POST /generate` runs a straight pipeline with no retries:
//!
//! ```text
//! Validating → Resolving → Forwarding → Responding
//! ```
//!
//! Each stage is a terminal failure point.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::http::error::GatewayError;
use crate::http::request::{request_id_of, GenerateRequest};
use crate::http::response::GenerateResponse;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::limits::check_input_length;
use crate::settings::resolve;

pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, GatewayError> {
    let start = Instant::now();
    let request_id = request_id_of(&headers);

    let result = match payload {
        Ok(Json(request)) => process(&state, request_id, request).await,
        Err(rejection) => Err(GatewayError::from(rejection)),
    };

    match &result {
        Ok(_) => metrics::record_request(StatusCode::OK.as_u16(), start),
        Err(e) => {
            let status = e.status();
            if status.is_server_error() {
                tracing::error!(request_id = %request_id, status = %status, error = %e, "Generate request failed");
            } else {
                tracing::info!(request_id = %request_id, status = %status, error = %e, "Generate request rejected");
            }
            metrics::record_request(status.as_u16(), start);
        }
    }

    result.map(|response| Json(GenerateResponse { response }))
}

async fn process(
    state: &AppState,
    request_id: &str,
    request: GenerateRequest,
) -> Result<String, GatewayError> {
    check_input_length(&request.text)?;

    let settings = resolve(
        &state.modes,
        request.mode.as_deref(),
        request.settings.as_ref(),
    )?;

    tracing::debug!(
        request_id = %request_id,
        mode = request.mode.as_deref().unwrap_or("default"),
        settings = %serde_json::Value::Object(settings.clone()),
        "Settings resolved"
    );

    let text = state.upstream.forward(&request.text, settings).await?;
    Ok(text)
}
