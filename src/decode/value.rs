// src/decode/value.rs
// Type-narrowing helpers shared by the decoders. No field of an untyped
// value is ever read without a presence + type check going through these.

use serde_json::{Map, Value};

/// Narrow to a plain JSON object. Arrays, strings and numbers all fail;
/// object-ness is decided before anything else so an array never passes
/// as an object.
pub fn as_plain_object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// Narrow to a finite f64. JSON cannot encode NaN or infinity, but the
/// filter keeps the contract explicit and guards any future lossy cast.
pub fn as_finite_f64(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Narrow to an array whose every element is a string.
pub fn as_string_array(value: &Value) -> Option<Vec<&str>> {
    let items = value.as_array()?;
    items.iter().map(Value::as_str).collect()
}

/// Trim every element, drop the ones that are empty after trimming, and
/// keep at most `cap` of what remains, in original order.
pub fn clean_string_list(items: &[&str], cap: usize) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(cap)
        .map(str::to_string)
        .collect()
}

/// A required display string: must be a string, non-empty after trim.
pub fn as_narrative_str(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
