// src/llm/mod.rs

pub mod client;
pub mod openai;
pub mod pipeline;
pub mod prompts;

pub use client::{ModelClient, ModelRequest, UpstreamError};
pub use openai::OpenAiClient;
pub use pipeline::{
    PipelineError, extract_screenshot, extract_transcript, generate_analysis, generate_metrics,
};
