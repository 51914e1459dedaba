// src/llm/openai.rs
// OpenAI Responses API client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use super::client::{ModelClient, ModelRequest, UpstreamError};

/// Thin client for POST {base_url}/responses. Single-shot: no retry, no
/// timeout beyond reqwest's defaults.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    const BASE_URL: &'static str = "https://api.openai.com/v1";

    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: Self::BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (local mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_body(request: &ModelRequest) -> Value {
        let mut user_content = vec![json!({"type": "text", "text": request.user_text})];
        for data_url in &request.image_data_urls {
            user_content.push(json!({"type": "input_image", "image_url": data_url}));
        }

        // store: false - nothing about a request is retained upstream
        json!({
            "model": request.model,
            "store": false,
            "input": [
                {
                    "role": "system",
                    "content": [{"type": "text", "text": request.system}],
                },
                {
                    "role": "user",
                    "content": user_content,
                },
            ],
        })
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn respond(&self, request: ModelRequest) -> Result<Value, UpstreamError> {
        debug!(
            model = %request.model,
            images = request.image_data_urls.len(),
            "Sending request to OpenAI Responses API"
        );

        let body = Self::build_body(&request);
        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), error_text));
        }

        Ok(response.json().await?)
    }
}
