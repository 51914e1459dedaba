// src/decode/metrics.rs
// Decoder for the rich metrics payload produced by the multi-image pipeline.

use serde::Serialize;
use serde_json::Value;

use super::value::{
    as_finite_f64, as_narrative_str, as_plain_object, as_string_array, clean_string_list,
};
use super::{DecodeError, DecodeResult};

/// Per-person share of some countable signal (messages sent, questions
/// asked). The model reports both sides; no constraint that they sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioPair {
    pub you: f64,
    pub them: f64,
}

/// Qualitative and quantitative signals backing the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    pub message_ratio: RatioPair,
    pub question_ratio: RatioPair,
    pub reply_speed_gap: String,
    pub affection_words: String,
    pub plan_initiative: String,
}

/// Full analysis of a multi-screenshot conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiteruMetrics {
    pub score: u8,
    pub relationship_type: String,
    pub outlook: String,
    pub summary: String,
    pub signals: Signals,
    pub red_flags: Vec<String>,
    pub advice: Vec<String>,
    pub confidence: f64,
}

const MAX_LIST_ITEMS: usize = 10;

fn decode_ratio_pair(value: Option<&Value>, field: &str) -> DecodeResult<RatioPair> {
    let object = value
        .and_then(as_plain_object)
        .ok_or_else(|| DecodeError::invalid(field))?;
    let you = object
        .get("you")
        .and_then(as_finite_f64)
        .ok_or_else(|| DecodeError::invalid(&format!("{}.you", field)))?;
    let them = object
        .get("them")
        .and_then(as_finite_f64)
        .ok_or_else(|| DecodeError::invalid(&format!("{}.them", field)))?;
    Ok(RatioPair { you, them })
}

fn decode_signal_text(
    signals: &serde_json::Map<String, Value>,
    key: &str,
) -> DecodeResult<String> {
    signals
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| DecodeError::invalid(&format!("signals.{}", key)))
}

pub fn decode_miteru_metrics(value: &Value) -> DecodeResult<MiteruMetrics> {
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
        .and_then(as_narrative_str)
        .ok_or_else(|| DecodeError::invalid("relationship_type"))?;
    let outlook = object
        .get("outlook")
        .and_then(as_narrative_str)
        .ok_or_else(|| DecodeError::invalid("outlook"))?;
    let summary = object
        .get("summary")
        .and_then(as_narrative_str)
        .ok_or_else(|| DecodeError::invalid("summary"))?;

    let signals = object
        .get("signals")
        .and_then(as_plain_object)
        .ok_or_else(|| DecodeError::invalid("signals"))?;
    let message_ratio = decode_ratio_pair(signals.get("message_ratio"), "signals.message_ratio")?;
    let question_ratio =
        decode_ratio_pair(signals.get("question_ratio"), "signals.question_ratio")?;
    let reply_speed_gap = decode_signal_text(signals, "reply_speed_gap")?;
    let affection_words = decode_signal_text(signals, "affection_words")?;
    let plan_initiative = decode_signal_text(signals, "plan_initiative")?;

    let red_flags = object
        .get("red_flags")
        .and_then(as_string_array)
        .ok_or_else(|| DecodeError::invalid("red_flags"))?;
    let advice = object
        .get("advice")
        .and_then(as_string_array)
        .ok_or_else(|| DecodeError::invalid("advice"))?;

    let confidence = object
        .get("confidence")
        .and_then(as_finite_f64)
        .ok_or_else(|| DecodeError::new("Invalid confidence"))?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(DecodeError::new("Confidence out of range"));
    }

    Ok(MiteruMetrics {
        score: score.round() as u8,
        relationship_type,
        outlook,
        summary,
        signals: Signals {
            message_ratio,
            question_ratio,
            reply_speed_gap,
            affection_words,
            plan_initiative,
        },
        red_flags: clean_string_list(&red_flags, MAX_LIST_ITEMS),
        advice: clean_string_list(&advice, MAX_LIST_ITEMS),
        confidence,
    })
}
