//! Relay response, independent of the HTTP framework until it is rendered.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use gemini_relay_types::GatewayError;

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Value,
}

impl GatewayResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Upstream statuses outside the range axum can represent become 502.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY)
    }
}

impl From<GatewayError> for GatewayResponse {
    fn from(err: GatewayError) -> Self {
        Self { status: err.http_status_code(), body: err.to_json() }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_gateway_error() {
        let response = GatewayResponse::from(GatewayError::GatewayTimeout { duration_ms: 30_000 });
        assert_eq!(response.status, 504);
        assert_eq!(response.body["error"], "Gateway Timeout");
    }

    #[test]
    fn test_out_of_range_status_falls_back_to_bad_gateway() {
        assert_eq!(GatewayResponse::new(1000, json!({})).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(GatewayResponse::new(429, json!({})).status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = GatewayResponse::new(418, json!({"x": 1})).into_response();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
