mod client_builder;
mod request_executor;


pub use client_builder::build_http_client;
pub use request_executor::{build_headers, parse_body};

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use gemini_relay_types::CanonicalRequest;

use crate::config::{Credential, GatewayConfig};

/// Result of one upstream call. Nothing here is raised as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome {
    /// 2xx. `body` is `None` when the upstream body was not JSON.
    Success { status: u16, body: Option<Value> },
    /// Non-2xx.
    Rejected { status: u16, status_text: String, body: Option<Value> },
    /// Deadline elapsed, or the call was cancelled (server shutdown) before a response arrived.
    Timeout,
    /// Any other transport fault.
    Transport(String),
}

pub struct UpstreamClient {
    http_client: Client,
    endpoint: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a new UpstreamClient with the given HTTP client.
    ///
    /// Accepts a pre-built `reqwest::Client` so the connection pool is shared
    /// across every request the process serves.
    pub fn new(http_client: Client, config: &GatewayConfig) -> Self {
        Self { http_client, endpoint: config.endpoint_url(), timeout: config.timeout }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Deadline in milliseconds, saturating at `u64::MAX`.
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// POST the canonical request to `generateContent`.
    ///
    /// The call races the deadline and `cancel`. Whichever fires first drops
    /// the in-flight request future, which closes its connection.
    pub async fn generate_content(
        &self,
        credential: &Credential,
        request: &CanonicalRequest,
        cancel: &CancellationToken,
    ) -> UpstreamOutcome {
        let call =
            request_executor::execute(&self.http_client, &self.endpoint, credential.expose(), request);

        match tokio::time::timeout(self.timeout, cancel.run_until_cancelled(call)).await {
            Ok(Some(outcome)) => outcome,
            // Only the shutdown token is passed here in production. The client
            // sees the same 504 as a deadline abort.
            Ok(None) => {
                tracing::warn!(
                    "[Upstream] Shutdown in progress, call aborted before a response arrived (answering 504)"
                );
                UpstreamOutcome::Timeout
            },
            Err(_) => {
                tracing::error!("[Upstream] Timeout after {}ms, call aborted", self.timeout.as_millis());
                UpstreamOutcome::Timeout
            },
        }
    }
}
