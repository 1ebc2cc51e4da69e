//! Detector Configuration
//!
//! Defines the configuration for snippet plagiarism detection including:
//! - Similarity thresholds (relevance filter, status bands, fallback matches)
//! - LLM provider settings
//! - Search provider settings
//! - Corpus and match limits
//!
//! Values come from built-in defaults, an optional TOML file, and the
//! environment, in increasing order of precedence.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Domains the search provider is restricted to
pub const DEFAULT_INCLUDE_DOMAINS: [&str; 7] = [
    "github.com",
    "stackoverflow.com",
    "gitlab.com",
    "bitbucket.org",
    "geeksforgeeks.org",
    "dev.to",
    "medium.com",
];

/// Complete detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub thresholds: Thresholds,
    pub llm: LlmConfig,
    pub search: SearchConfig,
    /// Maximum number of candidates sent to the LLM
    pub max_corpus_size: usize,
    /// Maximum number of matches surfaced in a verdict
    pub max_matches: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            llm: LlmConfig::default(),
            search: SearchConfig::default(),
            max_corpus_size: 15,
            max_matches: 5,
        }
    }
}

impl DetectorConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env();
        debug!("Loaded detector config from {}", path.display());
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply environment overrides for provider endpoints, models and keys
    pub fn apply_env(&mut self) {
        if let Some(key) = env_var("LLM_API_KEY").or_else(|| env_var("OPENAI_API_KEY")) {
            self.llm.api_key = key;
        }
        if let Some(base) = env_var("LLM_API_BASE") {
            self.llm.api_base = base;
        }
        if let Some(model) = env_var("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(key) = env_var("SEARCH_API_KEY").or_else(|| env_var("TAVILY_API_KEY")) {
            self.search.api_key = key;
        }
        if let Some(base) = env_var("SEARCH_API_BASE") {
            self.search.api_base = base;
        }

        info!(
            "Detector configured: model={}, llm_key={}, search_key={}",
            self.llm.model,
            mask_key(&self.llm.api_key),
            mask_key(&self.search.api_key)
        );
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.max_corpus_size == 0 {
            return Err(ConfigError::Invalid(
                "max_corpus_size must be at least 1".to_string(),
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "llm.timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm.temperature out of range: {}",
                self.llm.temperature
            )));
        }
        Ok(())
    }
}

/// Similarity thresholds. The values are the ones the marketplace has
/// always used; they are configurable but the defaults should not drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Search results must score strictly above this to be kept
    pub relevance: f64,
    /// Lowest similarity that is no longer PASS
    pub review: f64,
    /// Similarity strictly above this is FAIL
    pub fail: f64,
    /// Fallback engine records a match at or above this similarity
    pub fallback_match: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            relevance: 0.3,
            review: 0.5,
            fail: 0.7,
            fallback_match: 0.5,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("relevance", self.relevance),
            ("review", self.review),
            ("fail", self.fail),
            ("fallback_match", self.fallback_match),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "threshold {} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.review > self.fail {
            return Err(ConfigError::Invalid(format!(
                "review threshold ({}) exceeds fail threshold ({})",
                self.review, self.fail
            )));
        }
        Ok(())
    }
}

/// LLM provider configuration (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_base: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 4000,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Search provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_base: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub search_depth: String,
    pub max_results: u32,
    pub include_domains: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.tavily.com".to_string(),
            api_key: String::new(),
            search_depth: "advanced".to_string(),
            max_results: 10,
            include_domains: DEFAULT_INCLUDE_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

impl SearchConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Short preview of a secret for log lines
pub fn mask_key(key: &str) -> String {
    if key.is_empty() {
        "<unset>".to_string()
    } else if key.len() > 8 && key.is_ascii() {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "****".to_string()
    }
}
