use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse, routing::get, Router,
};
use tower_http::trace::TraceLayer;

use gemini_relay_core::{build_relay_router, ChatGateway};

use crate::cors::cors_layer;

/// Chat payloads may carry inline images as base64.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Public routes plus `/api/chat`.
///
/// The CORS layer sits outermost, so it answers `OPTIONS` preflights itself
/// (200, empty body) before the chat handler's 405 check runs. Every other
/// non-POST method on `/api/chat` still gets 405.
pub fn build_router(gateway: Arc<ChatGateway>, allowed_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/version", get(version_info));

    public_routes
        .merge(build_relay_router(gateway))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "version": option_env!("GIT_VERSION").unwrap_or("dev"),
            "build_time": option_env!("BUILD_TIME").unwrap_or("unknown"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
