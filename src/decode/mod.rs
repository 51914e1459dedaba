// src/decode/mod.rs
// Strict decoders for untyped JSON coming back from the model.
//
// Each decoder walks a `serde_json::Value` field by field, in declaration
// order, and either produces a fully-typed record or fails with a
// field-identifying `DecodeError`. The first violated field wins, so the
// error for a given malformed input is deterministic.

pub mod analysis;
pub mod derive;
pub mod envelope;
pub mod metrics;
pub mod value;
pub mod vision;

use thiserror::Error;

pub use analysis::{AnalyzeResult, Outlook, decode_analyze_result};
pub use derive::{SimpleMetrics, compute_simple_metrics};
pub use envelope::extract_output_text;
pub use metrics::{MiteruMetrics, RatioPair, Signals, decode_miteru_metrics};
pub use vision::{
    Sentiment, VisionExtract, VisionSamples, VisionTextExtract, decode_vision_extract,
    decode_vision_text,
};

/// Validation failure for one field of a model payload. The message names
/// the offending field ("Invalid score", "Score out of range", ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct DecodeError {
    reason: String,
}

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Standard "Invalid {field}" rejection.
    pub fn invalid(field: &str) -> Self {
        Self::new(format!("Invalid {}", field))
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;
