// src/decode/envelope.rs
// Pulls the generated text out of an OpenAI Responses API envelope.

use serde_json::Value;

use super::value::as_plain_object;

/// Extract the model's textual output from a response envelope.
///
/// The API returns one of two shapes: a flattened top-level `output_text`
/// string, or a nested `output` array of items whose `content` parts carry
/// the text. The top-level field is checked first; the structured walk is
/// the fallback. Fragments are joined with newlines in encounter order.
///
/// Returns `None` when the envelope is not an object, has no `output`
/// array, or yields zero text fragments. Never panics on malformed shape.
pub fn extract_output_text(data: &Value) -> Option<String> {
    let envelope = as_plain_object(data)?;

    if let Some(text) = envelope.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let output = envelope.get("output")?.as_array()?;

    let mut fragments: Vec<&str> = Vec::new();
    for item in output {
        let Some(item) = as_plain_object(item) else {
            continue;
        };
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in content {
            let Some(part) = as_plain_object(part) else {
                continue;
            };
            if part.get("type").and_then(Value::as_str) == Some("output_text")
                && let Some(text) = part.get("text").and_then(Value::as_str)
            {
                fragments.push(text);
            }
        }
    }

    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattened_output_text_wins() {
        let envelope = json!({"output_text": "X", "output": [{"content": [{"type": "output_text", "text": "ignored"}]}]});
        assert_eq!(extract_output_text(&envelope), Some("X".to_string()));
    }

    #[test]
    fn test_nested_parts_joined_in_order() {
        let envelope = json!({
            "output": [
                {"content": [
                    {"type": "output_text", "text": "A"},
                    {"type": "reasoning", "text": "skipped"},
                    {"type": "output_text", "text": "B"}
                ]}
            ]
        });
        assert_eq!(extract_output_text(&envelope), Some("A\nB".to_string()));
    }

    #[test]
    fn test_fragments_collected_across_items() {
        let envelope = json!({
            "output": [
                {"content": [{"type": "output_text", "text": "first"}]},
                {"content": [{"type": "output_text", "text": "second"}]}
            ]
        });
        assert_eq!(
            extract_output_text(&envelope),
            Some("first\nsecond".to_string())
        );
    }

    #[test]
    fn test_zero_qualifying_parts_is_not_found() {
        let envelope = json!({"output": [{"content": [{"type": "reasoning", "text": "x"}]}]});
        assert_eq!(extract_output_text(&envelope), None);
    }

    #[test]
    fn test_malformed_shapes_are_not_found() {
        assert_eq!(extract_output_text(&json!("just a string")), None);
        assert_eq!(extract_output_text(&json!([1, 2, 3])), None);
        assert_eq!(extract_output_text(&json!({"output": "not an array"})), None);
        assert_eq!(extract_output_text(&json!({})), None);
        // non-string output_text falls through to the structured walk
        assert_eq!(extract_output_text(&json!({"output_text": 42})), None);
    }

    #[test]
    fn test_malformed_items_and_parts_are_skipped() {
        let envelope = json!({
            "output": [
                "not an object",
                {"content": "not an array"},
                {"content": ["not an object", {"type": "output_text", "text": "kept"}]}
            ]
        });
        assert_eq!(extract_output_text(&envelope), Some("kept".to_string()));
    }
}
