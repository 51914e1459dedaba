// src/decode/vision.rs
// Decoders for the screenshot-extraction payloads.

use serde::Serialize;
use serde_json::Value;

use super::value::{as_finite_f64, as_plain_object, as_string_array, clean_string_list};
use super::{DecodeError, DecodeResult};

/// Overall sentiment of the conversation as judged by the vision model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Short trend label used in the derived metrics JSON.
    pub fn trend(&self) -> &'static str {
        match self {
            Sentiment::Positive => "pos",
            Sentiment::Negative => "neg",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// A few short message snippets per chat side, capped and blank-filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisionSamples {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// What the vision model read off a single screenshot: bubble counts per
/// side, sample snippets, and an overall sentiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisionExtract {
    pub left_count: u64,
    pub right_count: u64,
    pub samples: VisionSamples,
    pub sentiment: Sentiment,
}

/// Transcript pulled from one or more screenshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisionTextExtract {
    pub conversation_text: String,
}

const MAX_SAMPLES_PER_SIDE: usize = 12;

/// A bubble count: finite, non-negative, fractional input snapped to the
/// nearest integer rather than rejected.
fn decode_count(value: &Value, field: &str) -> DecodeResult<u64> {
    let number = as_finite_f64(value).ok_or_else(|| DecodeError::invalid(field))?;
    if number < 0.0 {
        return Err(DecodeError::invalid(field));
    }
    Ok(number.round() as u64)
}

pub fn decode_vision_extract(value: &Value) -> DecodeResult<VisionExtract> {
    let object = as_plain_object(value)
        .ok_or_else(|| DecodeError::new("Vision output is not a JSON object"))?;

    let left_count = decode_count(
        object.get("left_count").unwrap_or(&Value::Null),
        "left_count",
    )?;
    let right_count = decode_count(
        object.get("right_count").unwrap_or(&Value::Null),
        "right_count",
    )?;

    let samples = object
        .get("samples")
        .and_then(as_plain_object)
        .ok_or_else(|| DecodeError::invalid("samples"))?;
    let left = samples
        .get("left")
        .and_then(as_string_array)
        .ok_or_else(|| DecodeError::invalid("samples.left"))?;
    let right = samples
        .get("right")
        .and_then(as_string_array)
        .ok_or_else(|| DecodeError::invalid("samples.right"))?;

    let sentiment = match object.get("sentiment").and_then(Value::as_str) {
        Some("positive") => Sentiment::Positive,
        Some("neutral") => Sentiment::Neutral,
        Some("negative") => Sentiment::Negative,
        _ => return Err(DecodeError::invalid("sentiment")),
    };

    Ok(VisionExtract {
        left_count,
        right_count,
        samples: VisionSamples {
            left: clean_string_list(&left, MAX_SAMPLES_PER_SIDE),
            right: clean_string_list(&right, MAX_SAMPLES_PER_SIDE),
        },
        sentiment,
    })
}

pub fn decode_vision_text(value: &Value) -> DecodeResult<VisionTextExtract> {
    let object = as_plain_object(value)
        .ok_or_else(|| DecodeError::new("Vision output is not a JSON object"))?;

    let conversation_text = object
        .get("conversation_text")
        .and_then(super::value::as_narrative_str)
        .ok_or_else(|| DecodeError::invalid("conversation_text"))?;

    Ok(VisionTextExtract { conversation_text })
}
