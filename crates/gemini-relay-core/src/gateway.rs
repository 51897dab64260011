//! Chat relay pipeline: validate -> normalize -> call -> translate.

use axum::http::Method;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use gemini_relay_types::GatewayError;

use crate::config::GatewayConfig;
use crate::error::RelayResult;
use crate::normalize::normalize;
use crate::response::GatewayResponse;
use crate::upstream::{build_http_client, UpstreamClient, UpstreamOutcome};

/// Stateless per request; the config and connection pool are shared read-only.
pub struct ChatGateway {
    config: GatewayConfig,
    upstream: UpstreamClient,
    shutdown: CancellationToken,
}

impl ChatGateway {
    pub fn new(config: GatewayConfig, shutdown: CancellationToken) -> RelayResult<Self> {
        let http_client = build_http_client(config.timeout)?;
        Ok(Self::with_client(config, http_client, shutdown))
    }

    pub fn with_client(
        config: GatewayConfig,
        http_client: reqwest::Client,
        shutdown: CancellationToken,
    ) -> Self {
        let upstream = UpstreamClient::new(http_client, &config);
        Self { config, upstream, shutdown }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Handle one inbound request. Every failure becomes a response.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> GatewayResponse {
        match self.relay(method, body).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_operator_fault() {
                    error!("[Chat] {}", err);
                } else {
                    warn!("[Chat] {}", err);
                }
                GatewayResponse::from(err)
            },
        }
    }

    async fn relay(&self, method: &Method, body: &[u8]) -> Result<GatewayResponse, GatewayError> {
        if *method != Method::POST {
            return Err(GatewayError::MethodNotAllowed { method: method.to_string() });
        }

        let Some(credential) = self.config.credential.as_ref() else {
            return Err(GatewayError::ServerMisconfiguration);
        };

        let payload = parse_payload(body)?;
        let request = normalize(&payload);
        log_shapes(&payload, &request);

        let outcome = self.upstream.generate_content(credential, &request, &self.shutdown).await;
        translate(outcome, self.upstream.timeout_ms())
    }
}

/// The body must be a JSON object. Empty, invalid, `null` and primitives are rejected.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, GatewayError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(payload)) => Ok(payload),
        Ok(other) => {
            debug!("[Chat] Rejecting non-object body ({})", json_type(&other));
            Err(GatewayError::bad_request())
        },
        Err(e) => {
            debug!("[Chat] Rejecting unparseable body: {}", e);
            Err(GatewayError::bad_request())
        },
    }
}

pub fn translate(outcome: UpstreamOutcome, timeout_ms: u64) -> Result<GatewayResponse, GatewayError> {
    match outcome {
        UpstreamOutcome::Success { status, body } => {
            info!("[Chat] Upstream answered HTTP {}", status);
            Ok(GatewayResponse::new(status, body.unwrap_or(Value::Null)))
        },
        UpstreamOutcome::Rejected { status, status_text, body } => {
            Err(GatewayError::upstream(status, &status_text, body))
        },
        UpstreamOutcome::Timeout => Err(GatewayError::GatewayTimeout { duration_ms: timeout_ms }),
        UpstreamOutcome::Transport(message) => Err(GatewayError::Internal { message }),
    }
}

// Key names and lengths only: conversation text and the credential stay out of logs.
fn log_shapes(payload: &Map<String, Value>, request: &gemini_relay_types::CanonicalRequest) {
    let inbound: Vec<&str> = payload.keys().map(String::as_str).collect();
    info!("[Chat] Received payload keys: {:?}", inbound);
    info!("[Chat] Forwarding keys: {:?}", request.field_names());
    if let Some(len) = request.contents_len() {
        info!("[Chat] Contents length: {}", len);
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemini_relay_types::ErrorKind;
    use serde_json::json;

    fn gateway(config: GatewayConfig) -> ChatGateway {
        ChatGateway::new(config, CancellationToken::new()).unwrap()
    }

    #[tokio::test]
    async fn test_non_post_methods_rejected() {
        let gw = gateway(GatewayConfig::default().with_credential("k"));
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH, Method::OPTIONS] {
            let response = gw.handle(&method, br#"{"contents": []}"#).await;
            assert_eq!(response.status, 405, "{}", method);
            assert_eq!(response.body["error"], "Method Not Allowed");
        }
    }

    #[tokio::test]
    async fn test_method_checked_before_configuration() {
        let response = gateway(GatewayConfig::default()).handle(&Method::GET, b"").await;
        assert_eq!(response.status, 405);
    }

    #[tokio::test]
    async fn test_missing_credential_reported_regardless_of_body() {
        let gw = gateway(GatewayConfig::default());
        let bodies: [&[u8]; 3] = [b"", b"null", br#"{"history": []}"#];
        for body in bodies {
            let response = gw.handle(&Method::POST, body).await;
            assert_eq!(response.status, 500);
            assert_eq!(response.body["error"], ErrorKind::ServerMisconfiguration.label());
        }
    }

    #[test]
    fn test_parse_payload_rejects_non_objects() {
        let bodies: [&[u8]; 7] = [b"", b"null", b"42", br#""text""#, b"true", b"[1,2]", b"{not json"];
        for body in bodies {
            let err = parse_payload(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadRequest);
        }
        assert!(parse_payload(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_translate_success_without_json_body_relays_null() {
        let response =
            translate(UpstreamOutcome::Success { status: 200, body: None }, 30_000).unwrap();
        assert_eq!(response, GatewayResponse::new(200, Value::Null));
    }

    #[test]
    fn test_translate_failures() {
        let err = translate(UpstreamOutcome::Timeout, 30_000).unwrap_err();
        assert_eq!(err, GatewayError::GatewayTimeout { duration_ms: 30_000 });

        let err = translate(UpstreamOutcome::Transport("dns failure".into()), 30_000).unwrap_err();
        assert_eq!(GatewayResponse::from(err).body, json!({"error": "Internal Server Error", "message": "dns failure"}));

        let err = translate(
            UpstreamOutcome::Rejected {
                status: 400,
                status_text: "Bad Request".into(),
                body: Some(json!({"error": {"code": 400}})),
            },
            30_000,
        )
        .unwrap_err();
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.to_json()["details"], json!({"error": {"code": 400}}));
    }
}
