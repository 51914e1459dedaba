// src/api/error.rs
// HTTP error taxonomy. Every failure path answers with structured JSON
// ({"error": ..., "details": ...}); no route ever surfaces a panic or a
// raw stack trace.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Server-side misconfiguration (missing credential). 500.
    #[error("{0}")]
    Config(String),
    /// The caller sent something we refuse to process. 400.
    #[error("{0}")]
    BadRequest(String),
    /// Upload over the size ceiling. 413.
    #[error("{0}")]
    PayloadTooLarge(String),
    /// Fixed-window ceiling hit. 429 plus a Retry-After hint.
    #[error("Rate limit exceeded. Try again later.")]
    RateLimited { retry_after_secs: u64 },
    /// The model API failed, or its reply broke the output contract. 502.
    #[error("{message}")]
    Upstream {
        message: String,
        details: Option<String>,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            details: None,
        }
    }

    pub fn upstream_with(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_sec: Option<u64>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, retry_after, details) = match &self {
            ApiError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, None, None),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, None, None),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, None, None),
            ApiError::RateLimited { retry_after_secs } => {
                // routine, not an error
                debug!(retry_after_secs, "Rate limit denial");
                (StatusCode::TOO_MANY_REQUESTS, Some(*retry_after_secs), None)
            }
            ApiError::Upstream { message, details } => {
                warn!(error = %message, "Upstream failure surfaced to caller");
                (StatusCode::BAD_GATEWAY, None, details.clone())
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
            details,
            retry_after_sec: retry_after,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
