// src/config/server.rs
// Server and rate-limit configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: super::helpers::env_or("MITERU_HOST", "0.0.0.0"),
            port: super::helpers::env_u16("MITERU_PORT", 3000),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Fixed-window rate limit for the multi-image route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            max_requests: super::helpers::env_u32("RATE_LIMIT_MAX_REQUESTS", 12),
            window_secs: super::helpers::env_u64("RATE_LIMIT_WINDOW_SECS", 300),
        }
    }
}
