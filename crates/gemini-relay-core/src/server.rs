use std::sync::Arc;

use axum::{extract::State, http::Method, routing::any, Router};
use bytes::Bytes;

use crate::gateway::ChatGateway;
use crate::response::GatewayResponse;

pub const CHAT_PATH: &str = "/api/chat";

/// Shared relay state
pub type AppState = Arc<ChatGateway>;

/// Relay routes. Every method reaches the handler so it can answer 405 itself.
pub fn build_relay_router(gateway: AppState) -> Router<()> {
    Router::new().route(CHAT_PATH, any(handle_chat)).with_state(gateway)
}

/// Raw bytes in, so a missing or malformed body is reported as 400 by the
/// gateway instead of being rejected by an extractor.
pub async fn handle_chat(
    State(gateway): State<AppState>,
    method: Method,
    body: Bytes,
) -> GatewayResponse {
    gateway.handle(&method, &body).await
}
