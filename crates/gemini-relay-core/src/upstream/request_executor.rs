use reqwest::{header, Client};
use serde_json::Value;

use gemini_relay_types::CanonicalRequest;

use super::UpstreamOutcome;

/// Build the outbound headers. The credential travels only in `Authorization`.
pub fn build_headers(access_token: &str) -> Result<header::HeaderMap, String> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
    let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", access_token))
        .map_err(|_| "Credential contains characters not allowed in a header".to_string())?;
    auth.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth);
    Ok(headers)
}

/// Parse an upstream body as JSON, yielding `None` for empty or non-JSON bodies.
pub fn parse_body(bytes: &[u8]) -> Option<Value> {
    serde_json::from_slice(bytes).ok()
}

/// Send one request and read the whole body. No retries.
pub async fn execute(
    client: &Client,
    url: &str,
    access_token: &str,
    body: &CanonicalRequest,
) -> UpstreamOutcome {
    let headers = match build_headers(access_token) {
        Ok(h) => h,
        Err(e) => return UpstreamOutcome::Transport(e),
    };

    // Client-level timeouts (connect) are transport faults. Only the call
    // deadline in `UpstreamClient::generate_content` yields `Timeout`.
    let response = match client.post(url).headers(headers).json(body).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("[Upstream] Request failed: {}", e);
            return UpstreamOutcome::Transport(e.to_string());
        },
    };

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();

    // A body that fails mid-read is treated like a body that is not JSON.
    let parsed = match response.bytes().await {
        Ok(bytes) => parse_body(&bytes),
        Err(e) => {
            tracing::debug!("[Upstream] Failed to read body (HTTP {}): {}", status, e);
            None
        },
    };

    if status.is_success() {
        tracing::debug!("[Upstream] Request succeeded | Status: {}", status);
        UpstreamOutcome::Success { status: status.as_u16(), body: parsed }
    } else {
        tracing::warn!("[Upstream] Request rejected | Status: {}", status);
        UpstreamOutcome::Rejected { status: status.as_u16(), status_text, body: parsed }
    }
}
