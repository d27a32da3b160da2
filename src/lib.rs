//! ewyp - workplace accident reporting backend.
//!
//! Stores accident notification records, fills the government EWYP form
//! PDF, anonymizes filled forms, recovers field text from scans via OCR,
//! and drafts/critiques narrative answers through an LLM API.

pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod repository;
pub mod schema;
pub mod server;
