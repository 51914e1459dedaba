// src/api/guard.rs
// Payload-shape rejection for the /analyze body. Key-name matching only;
// no attempt at semantic detection of conversation content. Runs before
// any other validation of the body.

use serde_json::{Map, Value};

/// Top-level keys associated with raw conversation content. A metrics
/// payload carrying any of these is refused outright.
const RAW_CONTENT_KEYS: &[&str] = &[
    "messages",
    "message",
    "chat",
    "talk",
    "transcript",
    "text",
    "content",
    "raw",
    "lines",
    "logs",
];

/// Returns the first denylisted key present at the top level, if any.
pub fn find_raw_content_key(body: &Map<String, Value>) -> Option<&'static str> {
    RAW_CONTENT_KEYS
        .iter()
        .copied()
        .find(|key| body.contains_key(*key))
}
