// src/decode/analysis.rs
// Decoder for the final analysis payload returned to the /analyze caller.

use serde::Serialize;
use serde_json::Value;

use super::value::{as_finite_f64, as_plain_object, as_string_array};
use super::{DecodeError, DecodeResult};

/// Where the relationship is heading. Closed set; anything else from the
/// model is a contract violation, not a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Up,
    Flat,
    Risk,
}

/// The normalized analysis the front-end renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeResult {
    pub score: u8,
    pub relationship_type: String,
    pub outlook: Outlook,
    pub summary: String,
    pub red_flags: Vec<String>,
    pub advice: Vec<String>,
}

pub fn decode_analyze_result(value: &Value) -> DecodeResult<AnalyzeResult> {
    let object = as_plain_object(value)
        .ok_or_else(|| DecodeError::new("Model output is not a JSON object"))?;

    let score = object
        .get("score")
        .and_then(as_finite_f64)
        .ok_or_else(|| DecodeError::new("Invalid score"))?;
    if !(0.0..=100.0).contains(&score) {
        return Err(DecodeError::new("Score out of range"));
    }

    let relationship_type = object
        .get("relationship_type")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DecodeError::invalid("relationship_type"))?;

    let outlook = match object.get("outlook").and_then(Value::as_str) {
        Some("up") => Outlook::Up,
        Some("flat") => Outlook::Flat,
        Some("risk") => Outlook::Risk,
        _ => return Err(DecodeError::invalid("outlook")),
    };

    let summary = object
        .get("summary")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DecodeError::invalid("summary"))?;

    let red_flags = object
        .get("red_flags")
        .and_then(as_string_array)
        .ok_or_else(|| DecodeError::invalid("red_flags"))?;
    let advice = object
        .get("advice")
        .and_then(as_string_array)
        .ok_or_else(|| DecodeError::invalid("advice"))?;

    Ok(AnalyzeResult {
        score: score.round() as u8,
        relationship_type: relationship_type.to_string(),
        outlook,
        summary: summary.to_string(),
        red_flags: red_flags.iter().map(|s| s.to_string()).collect(),
        advice: advice.iter().map(|s| s.to_string()).collect(),
    })
}
