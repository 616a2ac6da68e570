use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// Forward a chat-completion request to the upstream API.
///
/// The body is passed through byte for byte; only the credential and the
/// attribution headers are added. Upstream success is relayed as-is,
/// upstream failure keeps its status with an `{error}` body.
pub async fn forward_chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let api_key = state
        .api_key
        .as_deref()
        .ok_or_else(|| ApiError::Config("API key configuration error on server.".to_string()))?;

    let mut request = state
        .http
        .post(&state.upstream_url)
        .bearer_auth(api_key)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    if let Some(site_url) = &state.site_url {
        request = request.header("HTTP-Referer", site_url);
    }
    if let Some(site_name) = &state.site_name {
        request = request.header("X-Title", site_name);
    }

    let upstream = request
        .send()
        .await
        .map_err(|e| ApiError::Internal(format!("upstream request failed: {e}")))?;

    let status = upstream.status().as_u16();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ApiError::Internal(format!("upstream body read failed: {e}")))?;
    let data: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Internal(format!("upstream returned non-JSON body ({status}): {e}")))?;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    if !status.is_success() {
        let detail = data
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        tracing::error!(status = status.as_u16(), %detail, "upstream API error");

        return Err(ApiError::Upstream {
            status,
            message: format!("upstream API error: {detail}"),
        });
    }

    Ok((StatusCode::OK, Json(data)).into_response())
}

/// Anything but POST on the chat route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
