//! Internet evidence gathering
//!
//! Builds a search query from the submitted code, asks the search provider
//! for similar public code, and keeps only the results that are relevant
//! enough to be worth showing to the AI analyzer.
//!
//! This step never fails: a provider error degrades to an empty result so
//! the rest of the pipeline can still run.

pub mod client;
pub mod query;

pub use client::HttpSearchClient;
pub use query::build_search_query;

use crate::config::{SearchConfig, Thresholds};
use crate::error::SearchError;
use crate::types::{InternetMatch, InternetSearchResult, MatchSource, SubmittedCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request sent to the search provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: String,
    pub max_results: u32,
    pub include_domains: Vec<String>,
}

impl SearchRequest {
    pub fn from_config(query: impl Into<String>, config: &SearchConfig) -> Self {
        Self {
            query: query.into(),
            search_depth: config.search_depth.clone(),
            max_results: config.max_results,
            include_domains: config.include_domains.clone(),
        }
    }
}

/// One result as returned by the search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResult {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawSearchResult>, SearchError>;
}

/// Turns a submission into a bounded set of plausible public matches
pub struct InternetEvidenceGatherer {
    provider: Arc<dyn SearchProvider>,
    config: SearchConfig,
    relevance_threshold: f64,
}

impl InternetEvidenceGatherer {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        config: SearchConfig,
        thresholds: &Thresholds,
    ) -> Self {
        Self {
            provider,
            config,
            relevance_threshold: thresholds.relevance,
        }
    }

    pub async fn gather(&self, submitted: &SubmittedCode) -> InternetSearchResult {
        let query = build_search_query(&submitted.code, submitted.language.as_deref());
        let request = SearchRequest::from_config(query, &self.config);

        match self.provider.search(&request).await {
            Ok(results) => {
                let total = results.len();
                let matches = filter_results(results, self.relevance_threshold);
                info!(
                    "Internet search kept {} of {} results",
                    matches.len(),
                    total
                );
                InternetSearchResult::from_matches(matches)
            }
            Err(SearchError::NotConfigured) => {
                debug!("Search provider not configured, skipping internet search");
                InternetSearchResult::empty()
            }
            Err(e) => {
                warn!("Internet search failed: {}", e);
                InternetSearchResult::empty()
            }
        }
    }
}

/// Map raw results to matches, dropping anything at or below the threshold
pub fn filter_results(results: Vec<RawSearchResult>, relevance_threshold: f64) -> Vec<InternetMatch> {
    results
        .into_iter()
        .filter(|r| r.score > relevance_threshold)
        .map(|r| InternetMatch {
            source: MatchSource::from_url(&r.url),
            url: r.url,
            title: r.title,
            snippet: r.content,
            relevance_score: r.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedSearch {
        results: Result<Vec<RawSearchResult>, String>,
        last_request: Mutex<Option<SearchRequest>>,
    }

    #[async_trait]
    impl SearchProvider for FixedSearch {
        async fn search(
            &self,
            request: &SearchRequest,
        ) -> Result<Vec<RawSearchResult>, SearchError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.results.clone().map_err(SearchError::Transport)
        }
    }

    fn raw(url: &str, score: f64) -> RawSearchResult {
        RawSearchResult {
            url: url.to_string(),
            title: format!("title for {}", url),
            content: "code".to_string(),
            score,
        }
    }

    fn gatherer(provider: Arc<FixedSearch>) -> InternetEvidenceGatherer {
        InternetEvidenceGatherer::new(provider, SearchConfig::default(), &Thresholds::default())
    }

    #[test]
    fn test_filter_discards_low_relevance() {
        let matches = filter_results(
            vec![
                raw("https://github.com/a", 0.9),
                raw("https://stackoverflow.com/q/1", 0.3),
                raw("https://dev.to/p", 0.31),
                raw("https://medium.com/p", 0.1),
            ],
            0.3,
        );
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].source, MatchSource::Github);
        assert_eq!(matches[1].source, MatchSource::Web);
        assert!(matches.iter().all(|m| m.relevance_score > 0.3));
    }

    #[tokio::test]
    async fn test_gather_success() {
        let provider = Arc::new(FixedSearch {
            results: Ok(vec![
                raw("https://github.com/a", 0.8),
                raw("https://gitlab.com/b", 0.2),
            ]),
            last_request: Mutex::new(None),
        });
        let result = gatherer(provider.clone())
            .gather(&SubmittedCode::new("def bubble_sort(xs): pass").with_language("python"))
            .await;

        assert!(result.found);
        assert_eq!(result.total_results, 1);
        assert_eq!(result.matches[0].url, "https://github.com/a");

        let request = provider.last_request.lock().unwrap().clone().unwrap();
        assert!(request.query.starts_with("python bubble_sort"));
        assert_eq!(request.search_depth, "advanced");
        assert_eq!(request.max_results, 10);
        assert_eq!(request.include_domains.len(), 7);
    }

    #[tokio::test]
    async fn test_gather_degrades_on_error() {
        let provider = Arc::new(FixedSearch {
            results: Err("connection refused".to_string()),
            last_request: Mutex::new(None),
        });
        let result = gatherer(provider).gather(&SubmittedCode::new("let x = 1;")).await;

        assert!(!result.found);
        assert!(result.matches.is_empty());
        assert_eq!(result.total_results, 0);
    }

    #[tokio::test]
    async fn test_gather_all_filtered_is_not_found() {
        let provider = Arc::new(FixedSearch {
            results: Ok(vec![raw("https://github.com/a", 0.05)]),
            last_request: Mutex::new(None),
        });
        let result = gatherer(provider).gather(&SubmittedCode::new("let x = 1;")).await;

        assert!(!result.found);
        assert_eq!(result.total_results, 0);
    }
}
