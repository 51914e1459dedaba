// src/api/http/analyze.rs
// POST /api/miteru/analyze - client-computed metrics in, analysis out.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use bytes::Bytes;
use serde_json::Value;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::guard::find_raw_content_key;
use crate::decode::AnalyzeResult;
use crate::llm::{PipelineError, generate_analysis};
use crate::state::AppState;

/// Wraps any stage failure of an analysis call the way the caller sees
/// it: one fixed message, the stage-specific reason in `details`.
pub(crate) fn analysis_error(err: PipelineError) -> ApiError {
    ApiError::upstream_with("Analyze failed", err.to_string())
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<AnalyzeResult>> {
    if !state.config.openai.has_api_key() {
        return Err(ApiError::config("OPENAI_API_KEY is not set"));
    }

    let body: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::bad_request("Invalid JSON body"))?;
    let body = body
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Body must be a JSON object"))?;

    // denylist check runs before any other validation of the body
    if find_raw_content_key(body).is_some() {
        return Err(ApiError::bad_request(
            "Only computed metrics JSON is allowed. Do not send raw talk logs or message text.",
        ));
    }

    let metrics = body
        .get("metrics")
        .filter(|v| v.is_object())
        .ok_or_else(|| ApiError::bad_request("metrics (object) is required"))?;

    let result = generate_analysis(
        state.model_client.as_ref(),
        &state.config.openai.model,
        metrics,
    )
    .await
    .map_err(analysis_error)?;

    info!(score = result.score, "Metrics analysis complete");
    Ok(Json(result))
}
