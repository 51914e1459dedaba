// src/api/http/mod.rs

pub mod analyze;
pub mod analyze_image;
pub mod health;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::state::AppState;

pub use health::health_check;

/// Backstop only. Kept above the worst legal framing (ten 8MB files) so
/// the handlers' per-file and combined ceilings always fire first with
/// their specific 413 messages; memory is bounded by the streaming reads
/// in the handlers, not by this limit.
const MAX_REQUEST_BYTES: usize = 84 * 1024 * 1024;

pub fn create_miteru_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/miteru/analyze", post(analyze::analyze))
        .route("/api/miteru/analyze-image", post(analyze_image::analyze_image))
        .route(
            "/api/miteru/analyze-images",
            post(analyze_image::analyze_images),
        )
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
}
