//! Chat-model extraction for veil
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint and turns
//! its JSON reply into located entities.

pub mod client;
pub mod extractor;
pub mod prompt;

pub use client::{ChatClient, ModelSettings};
pub use extractor::{LlmExtractor, locate, parse_response};
