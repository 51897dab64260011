//! Setup errors for the relay core.
//!
//! Per-request failures never surface here; they are translated into a
//! [`gemini_relay_types::GatewayError`] response at the handler boundary.

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RelayError {
    /// HTTP client could not be constructed (TLS backend, resolver).
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type RelayResult<T> = Result<T, RelayError>;
