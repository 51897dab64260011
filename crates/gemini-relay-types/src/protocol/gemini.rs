//! Google Gemini GenerateContent API types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Public Generative Language API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model resource every request is forwarded to.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

pub const GENERATE_CONTENT: &str = "generateContent";

/// Capability entries the relay lets through in `tools`.
pub const KNOWN_TOOLS: &[&str] = &["google_search"];

/// The only fields ever forwarded upstream.
pub const CANONICAL_FIELDS: &[&str] = &["contents", "systemInstruction", "tools"];

/// Normalized, allow-listed `generateContent` body.
///
/// Absent fields are omitted on the wire rather than sent as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
}

impl CanonicalRequest {
    /// Wire names of the fields that will be sent, in wire order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(CANONICAL_FIELDS.len());
        if self.contents.is_some() {
            names.push("contents");
        }
        if self.system_instruction.is_some() {
            names.push("systemInstruction");
        }
        if self.tools.is_some() {
            names.push("tools");
        }
        names
    }

    pub fn contents_len(&self) -> Option<usize> {
        self.contents.as_ref().map(Vec::len)
    }
}
