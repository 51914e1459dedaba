// src/config/llm.rs
// OpenAI configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4.1-mini";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// May be empty; checked per request so every analyze route can answer
    /// with a clean 500 instead of the process refusing to boot.
    pub api_key: String,
    pub model: String,
    pub vision_model: String,
}

impl OpenAIConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: super::helpers::env_or("OPENAI_API_KEY", ""),
            model: super::helpers::env_or_nonblank("OPENAI_MODEL", DEFAULT_MODEL),
            vision_model: super::helpers::env_or_nonblank(
                "OPENAI_VISION_MODEL",
                DEFAULT_VISION_MODEL,
            ),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
