//! dogechat-proxy library root.
//!
//! The proxy forwarder keeps the upstream chat API key on the server. It
//! accepts the client's `{model, messages}` body, attaches the credential,
//! forwards to a fixed upstream URL, and relays the answer back. The
//! binary runs the router on AWS Lambda or as a plain HTTP server; the
//! router itself lives here so integration tests can drive it directly.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the proxy router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health (no credential needed)
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/chat",
            post(routes::chat::forward_chat).fallback(routes::chat::method_not_allowed),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
