// src/lib.rs
// Miteru backend: forwards chat metrics and screenshots to OpenAI,
// validates the model's free-form JSON output, and republishes a
// normalized result.

pub mod api;
pub mod config;
pub mod decode;
pub mod llm;
pub mod state;
pub mod utils;
