// src/llm/client.rs
// The seam between the app and the upstream model API. Handlers and
// pipelines only see this trait; tests inject a mock.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// One request to the model: a system instruction plus user content made
/// of text and zero or more images (data URLs, in input order).
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub system: String,
    pub user_text: String,
    pub image_data_urls: Vec<String>,
}

impl ModelRequest {
    pub fn text(
        model: impl Into<String>,
        system: impl Into<String>,
        user_text: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            user_text: user_text.into(),
            image_data_urls: Vec::new(),
        }
    }

    pub fn with_images(mut self, image_data_urls: Vec<String>) -> Self {
        self.image_data_urls = image_data_urls;
        self
    }
}

/// Failure talking to the upstream API, before any output validation.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Non-success HTTP status, with a best-effort capture of the body.
    #[error("{}", .0.display_message())]
    Status(StatusFailure),
    #[error("OpenAI API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct StatusFailure {
    pub status: u16,
    pub body: String,
}

impl StatusFailure {
    fn display_message(&self) -> String {
        if self.body.is_empty() {
            format!("OpenAI API request failed ({})", self.status)
        } else {
            self.body.clone()
        }
    }
}

impl UpstreamError {
    pub fn status(status: u16, body: String) -> Self {
        Self::Status(StatusFailure { status, body })
    }

    /// The upstream body text, when there is one to pass through.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            UpstreamError::Status(failure) if !failure.body.is_empty() => Some(&failure.body),
            _ => None,
        }
    }
}

/// A request/response-style model call. Returns the raw, untyped response
/// envelope; everything downstream goes through the strict decoders.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn respond(&self, request: ModelRequest) -> Result<Value, UpstreamError>;
}
