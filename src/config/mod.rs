// src/config/mod.rs
// Central configuration for the Miteru backend

pub mod helpers;
pub mod llm;
pub mod server;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

pub use llm::OpenAIConfig;
pub use server::{RateLimitConfig, ServerConfig};

lazy_static! {
    pub static ref CONFIG: MiteruConfig = MiteruConfig::from_env();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiteruConfig {
    pub openai: OpenAIConfig,
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
}

impl MiteruConfig {
    pub fn from_env() -> Self {
        // Don't panic if .env doesn't exist (production sets real env vars)
        dotenv::dotenv().ok();

        Self {
            openai: OpenAIConfig::from_env(),
            server: ServerConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}
