// src/llm/pipeline.rs
// Call-then-validate pipelines: issue one model request, pull the text out
// of the envelope, parse it as JSON, and run the strict decoder. Each
// stage failure is its own variant so routes can name what went wrong.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::decode::{
    AnalyzeResult, DecodeError, MiteruMetrics, VisionExtract, VisionTextExtract,
    decode_analyze_result, decode_miteru_metrics, decode_vision_extract, decode_vision_text,
    extract_output_text,
};

use super::client::{ModelClient, ModelRequest, UpstreamError};
use super::prompts;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("Failed to read model output")]
    NoOutputText,
    #[error("Model output was not valid JSON")]
    InvalidJson,
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

async fn run<T>(
    client: &dyn ModelClient,
    request: ModelRequest,
    decode: fn(&Value) -> Result<T, DecodeError>,
) -> Result<T, PipelineError> {
    let envelope = client.respond(request).await?;

    let output_text = extract_output_text(&envelope).ok_or(PipelineError::NoOutputText)?;
    debug!(bytes = output_text.len(), "Extracted model output text");

    let parsed: Value =
        serde_json::from_str(&output_text).map_err(|_| PipelineError::InvalidJson)?;

    Ok(decode(&parsed)?)
}

/// Metrics JSON in, validated analysis out.
pub async fn generate_analysis(
    client: &dyn ModelClient,
    model: &str,
    metrics: &Value,
) -> Result<AnalyzeResult, PipelineError> {
    let request = ModelRequest::text(
        model,
        prompts::ANALYSIS_SYSTEM,
        prompts::metrics_user(&metrics.to_string()),
    );
    run(client, request, decode_analyze_result).await
}

/// Single screenshot in, bubble counts and sentiment out.
pub async fn extract_screenshot(
    client: &dyn ModelClient,
    vision_model: &str,
    data_url: String,
) -> Result<VisionExtract, PipelineError> {
    let request = ModelRequest::text(
        vision_model,
        prompts::VISION_EXTRACT_SYSTEM,
        prompts::VISION_EXTRACT_USER,
    )
    .with_images(vec![data_url]);
    run(client, request, decode_vision_extract).await
}

/// One or more screenshots in, a plain-text transcript out. All images go
/// in a single request, in input order.
pub async fn extract_transcript(
    client: &dyn ModelClient,
    vision_model: &str,
    data_urls: Vec<String>,
) -> Result<VisionTextExtract, PipelineError> {
    let request = ModelRequest::text(
        vision_model,
        prompts::TRANSCRIPT_SYSTEM,
        prompts::TRANSCRIPT_USER,
    )
    .with_images(data_urls);
    run(client, request, decode_vision_text).await
}

/// Transcript in, full metrics payload out.
pub async fn generate_metrics(
    client: &dyn ModelClient,
    model: &str,
    transcript: &str,
) -> Result<MiteruMetrics, PipelineError> {
    let request = ModelRequest::text(
        model,
        prompts::METRICS_SYSTEM,
        prompts::transcript_analysis_user(transcript),
    );
    run(client, request, decode_miteru_metrics).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct CannedClient {
        envelope: Value,
    }

    #[async_trait]
    impl ModelClient for CannedClient {
        async fn respond(&self, _request: ModelRequest) -> Result<Value, UpstreamError> {
            Ok(self.envelope.clone())
        }
    }

    #[tokio::test]
    async fn test_flattened_envelope_flows_through_decoder() {
        let client = CannedClient {
            envelope: json!({
                "output_text": "{\"conversation_text\":\"A: hi\\nB: hey\"}"
            }),
        };
        let extract = extract_transcript(&client, "m", vec![]).await.unwrap();
        assert_eq!(extract.conversation_text, "A: hi\nB: hey");
    }

    #[tokio::test]
    async fn test_envelope_without_text_is_terminal() {
        let client = CannedClient {
            envelope: json!({"output": []}),
        };
        let err = generate_analysis(&client, "m", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NoOutputText));
    }

    #[tokio::test]
    async fn test_non_json_text_is_invalid_json_not_decode_error() {
        let client = CannedClient {
            envelope: json!({"output_text": "sure, here's your analysis:"}),
        };
        let err = generate_analysis(&client, "m", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidJson));
    }

    #[tokio::test]
    async fn test_decoder_failure_surfaces_field_reason() {
        let client = CannedClient {
            envelope: json!({"output_text": "{\"score\": 101}"}),
        };
        let err = generate_analysis(&client, "m", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Score out of range");
    }
}
