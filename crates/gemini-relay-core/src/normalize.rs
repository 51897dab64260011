//! Inbound payload normalization.
//!
//! Clients send either `history` or `contents` for the conversation, plus
//! optional `systemInstruction` and `tools`. Only those three canonical fields
//! are ever forwarded; everything else is dropped.

use gemini_relay_types::protocol::gemini::KNOWN_TOOLS;
use gemini_relay_types::CanonicalRequest;
use serde_json::{Map, Value};

/// Where the conversation turns came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationSource {
    History,
    Contents,
    Missing,
}

impl ConversationSource {
    /// `history` wins over `contents`; a field only counts when it is an array.
    pub fn detect(payload: &Map<String, Value>) -> Self {
        if payload.get("history").is_some_and(Value::is_array) {
            Self::History
        } else if payload.get("contents").is_some_and(Value::is_array) {
            Self::Contents
        } else {
            Self::Missing
        }
    }

    fn field(self) -> Option<&'static str> {
        match self {
            Self::History => Some("history"),
            Self::Contents => Some("contents"),
            Self::Missing => None,
        }
    }
}

/// Build the allow-listed upstream body from an inbound payload.
///
/// Empty conversations are not rejected here; the upstream validates them.
pub fn normalize(payload: &Map<String, Value>) -> CanonicalRequest {
    let contents = ConversationSource::detect(payload)
        .field()
        .and_then(|field| payload.get(field))
        .and_then(Value::as_array)
        .cloned();

    let system_instruction = payload.get("systemInstruction").and_then(Value::as_object).cloned();

    let tools = payload
        .get("tools")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter(|entry| is_known_tool(entry)).cloned().collect());

    CanonicalRequest { contents, system_instruction, tools }
}

/// A tool entry passes when it is an object whose first key names a known capability.
pub fn is_known_tool(entry: &Value) -> bool {
    entry
        .as_object()
        .and_then(|object| object.keys().next())
        .is_some_and(|key| KNOWN_TOOLS.contains(&key.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("test payload must be an object, got {}", other),
        }
    }

    #[test]
    fn test_history_becomes_contents_and_unknown_tools_are_dropped() {
        let m1 = json!({"role": "user", "parts": [{"text": "oi"}]});
        let m2 = json!({"role": "model", "parts": [{"text": "olá"}]});
        let request = normalize(&payload(json!({
            "history": [m1, m2],
            "tools": [{"google_search": {}}, {"unknown_tool": {}}]
        })));

        assert_eq!(request.contents, Some(vec![m1, m2]));
        assert_eq!(request.tools, Some(vec![json!({"google_search": {}})]));
        assert!(request.system_instruction.is_none());
    }

    #[test]
    fn test_contents_fallback() {
        let m1 = json!({"role": "user", "parts": [{"text": "hi"}]});
        let request = normalize(&payload(json!({"contents": [m1]})));
        assert_eq!(request.contents, Some(vec![m1]));
    }

    #[test]
    fn test_history_takes_priority_over_contents() {
        let source = payload(json!({"history": [{"n": 1}], "contents": [{"n": 2}]}));
        assert_eq!(ConversationSource::detect(&source), ConversationSource::History);
        assert_eq!(normalize(&source).contents, Some(vec![json!({"n": 1})]));
    }

    #[test]
    fn test_non_array_history_falls_through_to_contents() {
        let source = payload(json!({"history": "not-a-list", "contents": [{"n": 2}]}));
        assert_eq!(ConversationSource::detect(&source), ConversationSource::Contents);
        assert_eq!(normalize(&source).contents, Some(vec![json!({"n": 2})]));
    }

    #[test]
    fn test_missing_conversation_is_forwarded_without_contents() {
        let request = normalize(&payload(json!({"message": "hello"})));
        assert_eq!(request, CanonicalRequest::default());
        assert!(request.field_names().is_empty());
    }

    #[test]
    fn test_system_instruction_must_be_object() {
        let instruction = json!({"parts": [{"text": "Responda em português."}]});
        let request = normalize(&payload(json!({"systemInstruction": instruction})));
        assert_eq!(request.system_instruction.map(Value::Object), Some(instruction));

        let request = normalize(&payload(json!({"systemInstruction": "be nice"})));
        assert!(request.system_instruction.is_none());

        let request = normalize(&payload(json!({"systemInstruction": null})));
        assert!(request.system_instruction.is_none());
    }

    #[test]
    fn test_tool_filter_edge_cases() {
        assert!(is_known_tool(&json!({"google_search": {}})));
        assert!(!is_known_tool(&json!({})));
        assert!(!is_known_tool(&json!(null)));
        assert!(!is_known_tool(&json!("google_search")));
        assert!(!is_known_tool(&json!(["google_search"])));
        // Only the first key decides.
        assert!(!is_known_tool(&json!({"code_execution": {}, "google_search": {}})));
        assert!(is_known_tool(&json!({"google_search": {}, "code_execution": {}})));
    }

    #[test]
    fn test_all_tools_filtered_still_sends_empty_list() {
        let request = normalize(&payload(json!({"contents": [], "tools": [{"unknown_tool": {}}]})));
        assert_eq!(request.tools, Some(vec![]));
        assert_eq!(request.contents_len(), Some(0));
    }

    #[test]
    fn test_unrecognized_fields_never_forwarded() {
        let request = normalize(&payload(json!({
            "history": [],
            "systemInstruction": {"parts": []},
            "tools": [],
            "generationConfig": {"temperature": 2.0},
            "safetySettings": [],
            "key": "client-supplied",
            "model": "gemini-ultra"
        })));
        let wire = serde_json::to_value(&request).unwrap();
        let keys: Vec<&str> = wire.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.iter().all(|k| ["contents", "systemInstruction", "tools"].contains(k)));
        assert_eq!(keys.len(), 3);
    }
}
