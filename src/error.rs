//! Error types for the detection pipeline

use thiserror::Error;

/// Failures on the AI similarity path. All of them are absorbed by the
/// detector, which switches to the fallback engine.
#[derive(Debug, Clone, Error)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("invalid API key")]
    InvalidApiKey,
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("request timeout")]
    Timeout,
    #[error("LLM provider error {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("LLM request failed: {0}")]
    Transport(String),
    #[error("No content in LLM response")]
    EmptyResponse,
    #[error("Failed to parse AI response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalyzerError::Timeout
        } else {
            AnalyzerError::Transport(err.to_string())
        }
    }
}

/// Failures while querying the search provider
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API key not configured")]
    NotConfigured,
    #[error("Search request failed: {0}")]
    Transport(String),
    #[error("Search provider error {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("Invalid search response: {0}")]
    Decode(String),
}

/// Failures while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
