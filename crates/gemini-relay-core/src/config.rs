//! Relay configuration.

use std::fmt;
use std::time::Duration;

use gemini_relay_types::protocol::gemini::GENERATE_CONTENT;
pub use gemini_relay_types::protocol::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Upper bound on a single upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Secret bearer token for the upstream API.
///
/// `Debug` is redacted so the value cannot end up in logs through `{:?}`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty value: an empty key is the same fault as a missing one.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Process-wide, immutable relay configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// `None` is reported per request as a server misconfiguration.
    pub credential: Option<Credential>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            credential: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    pub fn with_credential(mut self, value: impl Into<String>) -> Self {
        self.credential = Credential::new(value);
        self
    }

    /// `{base_url}/models/{model}:generateContent`. Never carries the credential.
    pub fn endpoint_url(&self) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, GENERATE_CONTENT)
    }
}

/// Pick the upstream base URL, falling back to the public endpoint on bad input.
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    let Some(raw) = explicit else {
        return DEFAULT_BASE_URL.to_string();
    };
    let url = raw.trim().trim_end_matches('/').to_string();
    if url.is_empty() {
        tracing::warn!("Upstream URL override is empty, using default");
        return DEFAULT_BASE_URL.to_string();
    }
    if url::Url::parse(&url).is_err() {
        tracing::warn!("Upstream URL override is not a valid URL, using default");
        return DEFAULT_BASE_URL.to_string();
    }
    tracing::info!("Using custom upstream URL: {}", url);
    url
}
