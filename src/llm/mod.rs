//! LLM client for drafting and reviewing notification answers.
//!
//! Supports OpenAI-compatible chat APIs and local Ollama inference.

mod client;
mod config;
mod prompts;

pub use client::{FieldRecommendation, LlmClient, LlmError};
pub use config::{LlmConfig, LlmProvider};
