// src/api/http/health.rs
// Liveness endpoint. There is no storage or long-lived dependency to
// probe; this reports the process is up and which models it will use.
//
// GET /health

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
    vision_model: String,
    api_key: &'static str,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok",
        model: state.config.openai.model.clone(),
        vision_model: state.config.openai.vision_model.clone(),
        api_key: if state.config.openai.has_api_key() {
            "configured"
        } else {
            "missing"
        },
    };

    Json(response)
}
