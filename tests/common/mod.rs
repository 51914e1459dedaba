// tests/common/mod.rs
// Shared harness: a canned model client and app/server builders.

// each test binary uses its own subset of these helpers
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use serde_json::{Value, json};

use miteru_backend::api::http::create_miteru_router;
use miteru_backend::config::{MiteruConfig, OpenAIConfig, RateLimitConfig, ServerConfig};
use miteru_backend::llm::{ModelClient, ModelRequest, UpstreamError};
use miteru_backend::state::AppState;

/// Plays the upstream model: requests carrying images get the vision
/// envelope, text-only requests get the text envelope. Every request is
/// recorded for assertions.
pub struct MockModelClient {
    vision_envelope: Value,
    text_envelope: Value,
    fail_status: Option<(u16, String)>,
    pub requests: Mutex<Vec<ModelRequest>>,
}

impl MockModelClient {
    pub fn new(vision_envelope: Value, text_envelope: Value) -> Self {
        Self {
            vision_envelope,
            text_envelope,
            fail_status: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text_only(text_envelope: Value) -> Self {
        Self::new(json!({}), text_envelope)
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            vision_envelope: json!({}),
            text_envelope: json!({}),
            fail_status: Some((status, body.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn respond(&self, request: ModelRequest) -> Result<Value, UpstreamError> {
        let has_images = !request.image_data_urls.is_empty();
        self.requests.lock().unwrap().push(request);

        if let Some((status, body)) = &self.fail_status {
            return Err(UpstreamError::status(*status, body.clone()));
        }
        if has_images {
            Ok(self.vision_envelope.clone())
        } else {
            Ok(self.text_envelope.clone())
        }
    }
}

pub fn test_config(api_key: &str, max_requests: u32) -> MiteruConfig {
    MiteruConfig {
        openai: OpenAIConfig {
            api_key: api_key.to_string(),
            model: "gpt-4.1-mini".to_string(),
            vision_model: "gpt-4.1-mini".to_string(),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        rate_limit: RateLimitConfig {
            max_requests,
            window_secs: 300,
        },
    }
}

pub fn test_app(config: MiteruConfig, client: Arc<MockModelClient>) -> Router {
    let state = Arc::new(AppState::new(config, client));
    create_miteru_router().with_state(state)
}

/// Serve the app on an ephemeral local port; returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A MiteruMetrics payload the decoder accepts, as envelope output text.
pub fn valid_metrics_json() -> String {
    json!({
        "score": 58,
        "relationship_type": "friends, maybe more",
        "outlook": "slowly warming",
        "summary": "Conversation is friendly and balanced.",
        "signals": {
            "message_ratio": {"you": 0.5, "them": 0.5},
            "question_ratio": {"you": 0.6, "them": 0.4},
            "reply_speed_gap": "similar",
            "affection_words": "rare",
            "plan_initiative": "shared"
        },
        "red_flags": [],
        "advice": ["keep the current pace"],
        "confidence": 0.7
    })
    .to_string()
}

/// An AnalyzeResult payload the decoder accepts, as envelope output text.
pub fn valid_analysis_json() -> String {
    json!({
        "score": 72,
        "relationship_type": "close friends",
        "outlook": "up",
        "summary": "Balanced and warm.",
        "red_flags": ["slow replies at night"],
        "advice": ["keep it up"]
    })
    .to_string()
}
