//! Gateway error taxonomy.
//!
//! Every way a relay request can fail maps to exactly one [`GatewayError`]
//! variant. Each variant has a fixed HTTP status (except upstream rejections,
//! which keep the upstream's own status) and a stable `error` label that
//! clients match on.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Label used when the upstream API rejected the request.
pub const UPSTREAM_ERROR_LABEL: &str = "Erro na API do Gemini";

const MSG_METHOD_NOT_ALLOWED: &str =
    "Apenas requisições POST são permitidas para este endpoint.";
const MSG_MISCONFIGURATION: &str =
    "A chave GEMINI_API_KEY não está configurada no ambiente do servidor.";
const MSG_TIMEOUT: &str = "Timeout ao chamar a API externa.";

/// Discriminant of [`GatewayError`], for matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MethodNotAllowed,
    ServerMisconfiguration,
    BadRequest,
    UpstreamError,
    GatewayTimeout,
    InternalServerError,
}

impl ErrorKind {
    /// Stable `error` label written into the response body.
    pub fn label(self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::ServerMisconfiguration => "Server Misconfiguration",
            Self::BadRequest => "Bad Request",
            Self::UpstreamError => UPSTREAM_ERROR_LABEL,
            Self::GatewayTimeout => "Gateway Timeout",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

/// Errors produced while relaying a chat request.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GatewayError {
    /// Inbound method was not POST
    #[error("Method {method} not allowed")]
    MethodNotAllowed { method: String },

    /// Upstream credential is not configured
    #[error("Upstream credential is not configured")]
    ServerMisconfiguration,

    /// Inbound body missing or not a JSON object
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Upstream answered with a non-2xx status.
    ///
    /// `details` is the parsed upstream body, or `{statusText}` when the body
    /// was not JSON.
    #[error("Upstream rejected request with HTTP {status}")]
    Upstream { status: u16, details: Value },

    /// Upstream call aborted by the deadline
    #[error("Upstream timeout after {duration_ms}ms")]
    GatewayTimeout { duration_ms: u64 },

    /// Transport or runtime fault
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    pub fn bad_request() -> Self {
        Self::BadRequest {
            message: "O corpo da requisição deve ser um JSON válido com os dados da requisição."
                .to_string(),
        }
    }

    /// Build an upstream rejection, degrading an unparseable or empty body to `{statusText}`.
    ///
    /// `null`, `false`, `0` and `""` carry nothing for the client and degrade too.
    pub fn upstream(status: u16, status_text: &str, body: Option<Value>) -> Self {
        let details = body
            .filter(|value| !is_blank(value))
            .unwrap_or_else(|| json!({ "statusText": status_text }));
        Self::Upstream { status, details }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MethodNotAllowed { .. } => ErrorKind::MethodNotAllowed,
            Self::ServerMisconfiguration => ErrorKind::ServerMisconfiguration,
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::Upstream { .. } => ErrorKind::UpstreamError,
            Self::GatewayTimeout { .. } => ErrorKind::GatewayTimeout,
            Self::Internal { .. } => ErrorKind::InternalServerError,
        }
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed { .. } => 405,
            Self::ServerMisconfiguration => 500,
            Self::BadRequest { .. } => 400,
            Self::Upstream { status, .. } => *status,
            Self::GatewayTimeout { .. } => 504,
            Self::Internal { .. } => 500,
        }
    }

    /// Check if the fault lies with the operator rather than the client or upstream.
    pub fn is_operator_fault(&self) -> bool {
        matches!(self, Self::ServerMisconfiguration)
    }

    /// Client-facing message. Upstream rejections carry `details` instead.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::MethodNotAllowed { .. } => Some(MSG_METHOD_NOT_ALLOWED.to_string()),
            Self::ServerMisconfiguration => Some(MSG_MISCONFIGURATION.to_string()),
            Self::BadRequest { message } | Self::Internal { message } => Some(message.clone()),
            Self::GatewayTimeout { .. } => Some(MSG_TIMEOUT.to_string()),
            Self::Upstream { .. } => None,
        }
    }

    /// Response body: `{error, message}` or, for upstream rejections, `{error, details}`.
    pub fn to_json(&self) -> Value {
        let label = self.kind().label();
        match self {
            Self::Upstream { details, .. } => json!({ "error": label, "details": details }),
            _ => json!({ "error": label, "message": self.message() }),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
