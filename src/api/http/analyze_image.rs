// src/api/http/analyze_image.rs
// Screenshot analysis routes.
//
// POST /api/miteru/analyze-image  - legacy single-image path: vision
//   extract, derived metrics, analysis; responds with a trimmed result.
// POST /api/miteru/analyze-images - multi-image path: rate limited per
//   client IP, transcribes all screenshots in one request, then generates
//   the full metrics payload.
//
// The two routes deliberately keep their historical limits: 6MB for the
// single image, 8MB each / 20MB combined for the batch.

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::{Field, Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::HeaderMap;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::decode::{MiteruMetrics, Outlook, compute_simple_metrics};
use crate::llm::{
    PipelineError, extract_screenshot, extract_transcript, generate_analysis, generate_metrics,
};
use crate::state::AppState;
use crate::utils::RateDecision;

use super::analyze::analysis_error;

const SINGLE_IMAGE_MAX_BYTES: usize = 6 * 1024 * 1024;
const MULTI_IMAGE_MAX_FILES: usize = 10;
const MULTI_IMAGE_MAX_BYTES_EACH: usize = 8 * 1024 * 1024;
const MULTI_IMAGE_MAX_BYTES_TOTAL: usize = 20 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg"];

#[derive(Serialize)]
pub struct AnalyzeImageResponse {
    score: u8,
    relationship_type: String,
    outlook: Outlook,
    summary: String,
}

#[derive(Serialize)]
pub struct AnalyzeImagesResponse {
    metrics: MiteruMetrics,
    transcript: String,
    debug: DebugInfo,
}

#[derive(Serialize)]
struct DebugInfo {
    image_count: usize,
    total_bytes: usize,
    vision_model: String,
    model: String,
}

/// One uploaded image, validated and held in memory only - nothing is
/// ever written to disk.
struct UploadedImage {
    content_type: String,
    data: bytes::Bytes,
}

impl UploadedImage {
    fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.data)
        )
    }
}

/// Vision-stage failures, named for the caller stage by stage.
fn vision_error(err: PipelineError) -> ApiError {
    match err {
        PipelineError::Upstream(upstream) => match upstream.upstream_body() {
            Some(body) => ApiError::upstream_with("OpenAI vision request failed", body),
            None => ApiError::upstream("OpenAI vision request failed"),
        },
        PipelineError::NoOutputText => ApiError::upstream("Failed to read vision output"),
        PipelineError::InvalidJson => ApiError::upstream("Vision output was not valid JSON"),
        PipelineError::Decode(decode) => {
            ApiError::upstream_with("Failed to extract screenshot info", decode.to_string())
        }
    }
}

/// Client identity for rate limiting: first hop of x-forwarded-for, else
/// x-real-ip, else "unknown".
fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok())
        && let Some(first) = forwarded.split(',').next()
    {
        let first = first.trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }
    if let Some(real) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real = real.trim();
        if !real.is_empty() {
            return real.to_string();
        }
    }
    "unknown".to_string()
}

async fn read_image_field(
    mut field: Field<'_>,
    max_bytes: usize,
    oversize_message: &str,
) -> ApiResult<UploadedImage> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(ApiError::bad_request("Only png/jpg images are allowed"));
    }

    // Stream the part so an oversize file is rejected with its own 413 as
    // soon as it crosses the limit, instead of buffering it whole.
    let mut data = bytes::BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|_| ApiError::bad_request("Expected multipart/form-data"))?
    {
        if data.len() + chunk.len() > max_bytes {
            return Err(ApiError::payload_too_large(oversize_message));
        }
        data.extend_from_slice(&chunk);
    }

    Ok(UploadedImage { content_type, data: data.freeze() })
}

pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<AnalyzeImageResponse>> {
    if !state.config.openai.has_api_key() {
        return Err(ApiError::config("OPENAI_API_KEY is not set"));
    }

    let mut multipart =
        multipart.map_err(|_| ApiError::bad_request("Expected multipart/form-data"))?;

    let mut image: Option<UploadedImage> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Expected multipart/form-data"))?
    {
        if field.name() == Some("image") {
            image = Some(
                read_image_field(field, SINGLE_IMAGE_MAX_BYTES, "Image is too large (max 6MB)")
                    .await?,
            );
            break;
        }
    }
    let image = image.ok_or_else(|| ApiError::bad_request("image file is required"))?;

    debug!(bytes = image.data.len(), "Single screenshot received");

    let extract = extract_screenshot(
        state.model_client.as_ref(),
        &state.config.openai.vision_model,
        image.to_data_url(),
    )
    .await
    .map_err(vision_error)?;

    let metrics = serde_json::to_value(compute_simple_metrics(&extract))
        .map_err(|e| ApiError::upstream_with("Analyze failed", e.to_string()))?;

    let result = generate_analysis(
        state.model_client.as_ref(),
        &state.config.openai.model,
        &metrics,
    )
    .await
    .map_err(analysis_error)?;

    info!(score = result.score, "Screenshot analysis complete");
    Ok(Json(AnalyzeImageResponse {
        score: result.score,
        relationship_type: result.relationship_type,
        outlook: result.outlook,
        summary: result.summary,
    }))
}

pub async fn analyze_images(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<AnalyzeImagesResponse>> {
    if !state.config.openai.has_api_key() {
        return Err(ApiError::config("OPENAI_API_KEY is not set"));
    }

    let identity = client_ip(&headers);
    if let RateDecision::Denied { retry_after_secs } = state.rate_limiter.check(&identity) {
        return Err(ApiError::RateLimited { retry_after_secs });
    }

    let mut multipart =
        multipart.map_err(|_| ApiError::bad_request("Expected multipart/form-data"))?;

    let mut images: Vec<UploadedImage> = Vec::new();
    let mut total_bytes = 0usize;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Expected multipart/form-data"))?
    {
        if field.name() != Some("images") {
            continue;
        }
        if images.len() == MULTI_IMAGE_MAX_FILES {
            return Err(ApiError::bad_request("Too many images (max 10)"));
        }

        let image = read_image_field(
            field,
            MULTI_IMAGE_MAX_BYTES_EACH,
            "Image is too large (max 8MB each)",
        )
        .await?;

        total_bytes += image.data.len();
        if total_bytes > MULTI_IMAGE_MAX_BYTES_TOTAL {
            return Err(ApiError::payload_too_large(
                "Images are too large (max 20MB total)",
            ));
        }
        images.push(image);
    }
    if images.is_empty() {
        return Err(ApiError::bad_request("images files are required"));
    }

    debug!(
        identity = %identity,
        count = images.len(),
        total_bytes,
        "Screenshot batch received"
    );

    // base64-encode in input order; one outbound request carries them all
    let data_urls: Vec<String> = images.iter().map(UploadedImage::to_data_url).collect();

    let transcript = extract_transcript(
        state.model_client.as_ref(),
        &state.config.openai.vision_model,
        data_urls,
    )
    .await
    .map_err(vision_error)?;

    let metrics = generate_metrics(
        state.model_client.as_ref(),
        &state.config.openai.model,
        &transcript.conversation_text,
    )
    .await
    .map_err(analysis_error)?;

    info!(
        score = metrics.score,
        images = images.len(),
        "Screenshot batch analysis complete"
    );
    Ok(Json(AnalyzeImagesResponse {
        metrics,
        transcript: transcript.conversation_text,
        debug: DebugInfo {
            image_count: images.len(),
            total_bytes,
            vision_model: state.config.openai.vision_model.clone(),
            model: state.config.openai.model.clone(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers), "198.51.100.2");
    }

    #[test]
    fn test_client_ip_unknown_without_headers() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_data_url_format() {
        let image = UploadedImage {
            content_type: "image/png".to_string(),
            data: bytes::Bytes::from_static(b"\x89PNG"),
        };
        assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw==");
    }
}
