// src/api/mod.rs

pub mod error;
pub mod guard;
pub mod http;

pub use error::{ApiError, ApiResult};
