//! LLM-driven similarity analysis
//!
//! - `client`: OpenAI-compatible chat completions client
//! - `prompt`: the system prompt contract and the user message
//! - `parse`: ordered strategies for pulling JSON out of model output
//! - `analyzer`: runs one analysis and maps the result onto a verdict

pub mod analyzer;
pub mod client;
pub mod parse;
pub mod prompt;

pub use analyzer::AiSimilarityAnalyzer;
pub use client::LlmClient;
pub use parse::{parse_ai_response, AiMatch, AiResponse, ParseStrategy};

use crate::error::AnalyzerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// A single chat completion request. The provider supplies the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider to constrain output to a JSON object
    pub json_response: bool,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the text content of the first completion choice
    async fn complete(&self, request: &ChatRequest) -> Result<String, AnalyzerError>;
}
