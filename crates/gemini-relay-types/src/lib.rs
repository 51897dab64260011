//! # Gemini Relay Types
//!
//! Core types and error definitions for Gemini Relay.
//!
//! - **`error`** - The closed error taxonomy every request outcome maps into
//! - **`protocol`** - Gemini `generateContent` wire constants and the canonical request
//!
//! ## Architecture Role
//!
//! `gemini-relay-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!   gemini-relay-types (this crate)
//!            │
//!            ▼
//!   gemini-relay-core
//!            │
//!            ▼
//!   gemini-relay-server
//! ```

pub mod error;
pub mod protocol;

pub use error::{ErrorKind, GatewayError};
pub use protocol::gemini::CanonicalRequest;
