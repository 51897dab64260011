//! # Gemini Relay Core
//!
//! Server-side relay for the Gemini `generateContent` API. A client posts a
//! chat payload; the relay normalizes it into an allow-listed request, attaches
//! the operator's credential, forwards it with a deadline and translates the
//! outcome into a stable response.
//!
//! ```text
//! gemini-relay-core/src/
//! ├── config.rs      # GatewayConfig + redacted Credential
//! ├── normalize.rs   # inbound payload -> CanonicalRequest
//! ├── upstream/      # reqwest client, deadline + cancellation, UpstreamOutcome
//! ├── gateway.rs     # validate -> normalize -> call -> translate
//! ├── response.rs    # GatewayResponse (axum IntoResponse)
//! └── server.rs      # axum route wiring for /api/chat
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod response;
pub mod server;
pub mod upstream;

pub use config::{Credential, GatewayConfig};
pub use error::{RelayError, RelayResult};
pub use gateway::ChatGateway;
pub use response::GatewayResponse;
pub use server::build_relay_router;
