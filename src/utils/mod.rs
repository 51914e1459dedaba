// src/utils/mod.rs

pub mod rate_limiter;

pub use rate_limiter::{
    FixedWindowLimiter, InMemoryLimitStore, LimitStore, RateDecision, RateLimitEntry,
};
