//! HTTP client for the web search provider

use super::{RawSearchResult, SearchProvider, SearchRequest};
use crate::config::SearchConfig;
use crate::error::SearchError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: u32,
    include_domains: &'a [String],
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawSearchResult>,
}

/// Search provider client (Tavily-compatible `/search` endpoint)
pub struct HttpSearchClient {
    client: Client,
    api_base: String,
    config: SearchConfig,
}

impl HttpSearchClient {
    /// Uses the provider client's default timeout
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            config: config.clone(),
        })
    }
}

#[async_trait]
impl SearchProvider for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawSearchResult>, SearchError> {
        if !self.config.has_api_key() {
            return Err(SearchError::NotConfigured);
        }

        let url = format!("{}/search", self.api_base);
        debug!("Search request to {}: {}", url, request.query);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&SearchBody {
                query: &request.query,
                search_depth: &request.search_depth,
                max_results: request.max_results,
                include_domains: &request.include_domains,
            })
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Provider { status, body });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        debug!("Search returned {} raw results", parsed.results.len());
        Ok(parsed.results)
    }
}
