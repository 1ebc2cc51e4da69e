//! LLM Client for similarity analysis

use super::{ChatMessage, ChatProvider, ChatRequest};
use crate::config::{mask_key, LlmConfig};
use crate::error::AnalyzerError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat completions client
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(
            "LLM client: model={}, api_key={}",
            config.model,
            mask_key(&config.api_key)
        );
        Ok(Self { client, config })
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<String, AnalyzerError> {
        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(AnalyzerError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => return Err(AnalyzerError::RateLimited),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AnalyzerError::Provider {
                    status: status.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AnalyzerError::Timeout
            } else {
                AnalyzerError::Parse(format!("Invalid completion body: {}", e))
            }
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AnalyzerError::EmptyResponse)
    }
}

#[async_trait]
impl ChatProvider for LlmClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, AnalyzerError> {
        if !self.config.has_api_key() {
            return Err(AnalyzerError::Config(
                "LLM API key not configured".to_string(),
            ));
        }

        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        debug!(
            "Calling LLM: model={}, messages={}",
            self.config.model,
            request.messages.len()
        );

        let body = CompletionBody {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_response
                .then_some(ResponseFormat { kind: "json_object" }),
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let content = self.handle_response(response).await?;
        debug!("LLM response: {} chars", content.len());
        Ok(content)
    }
}
