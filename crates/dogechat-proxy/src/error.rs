use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    /// Server-side configuration gap (e.g. missing credential).
    Config(String),
    /// Upstream answered with a non-success status.
    Upstream { status: StatusCode, message: String },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MethodNotAllowed => {
                let body = Json(ErrorBody {
                    error: "Method Not Allowed".to_string(),
                });
                return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "POST")], body)
                    .into_response();
            }
            ApiError::Config(msg) => {
                tracing::error!("configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::Upstream { status, message } => (status, message),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error in proxy.".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
