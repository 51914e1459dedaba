// src/state.rs
// Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use crate::config::MiteruConfig;
use crate::llm::ModelClient;
use crate::utils::FixedWindowLimiter;

pub struct AppState {
    pub config: MiteruConfig,
    pub model_client: Arc<dyn ModelClient>,
    pub rate_limiter: FixedWindowLimiter,
}

impl AppState {
    pub fn new(config: MiteruConfig, model_client: Arc<dyn ModelClient>) -> Self {
        let rate_limiter = FixedWindowLimiter::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_secs),
        );

        Self {
            config,
            model_client,
            rate_limiter,
        }
    }
}
