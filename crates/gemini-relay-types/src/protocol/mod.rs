//! Protocol definitions for the upstream API.
//!
//! Only the Google Gemini `generateContent` request shape is modeled; the
//! response is relayed as opaque JSON.

pub mod gemini;
