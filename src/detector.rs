//! Plagiarism Detector
//!
//! Pipeline: gather internet evidence -> build corpus -> AI analysis,
//! falling back to lexical similarity over local snippets when the AI path
//! fails for any reason.
//!
//! The detector holds no mutable state; one instance can serve concurrent
//! requests.

use crate::config::DetectorConfig;
use crate::corpus::{bound_corpus, build_corpus};
use crate::fallback::fallback_verdict;
use crate::llm::{AiSimilarityAnalyzer, ChatProvider, LlmClient};
use crate::search::{HttpSearchClient, InternetEvidenceGatherer, SearchProvider};
use crate::types::{ExistingSnippet, PlagiarismVerdict, Status, SubmittedCode};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

pub struct PlagiarismDetector {
    config: DetectorConfig,
    gatherer: InternetEvidenceGatherer,
    analyzer: AiSimilarityAnalyzer,
}

impl PlagiarismDetector {
    pub fn new(
        config: DetectorConfig,
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn ChatProvider>,
    ) -> Self {
        let gatherer =
            InternetEvidenceGatherer::new(search, config.search.clone(), &config.thresholds);
        let analyzer =
            AiSimilarityAnalyzer::new(llm, &config.llm, config.thresholds, config.max_matches);
        Self {
            config,
            gatherer,
            analyzer,
        }
    }

    /// Build HTTP-backed providers from configuration
    pub fn from_config(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let search = Arc::new(HttpSearchClient::new(&config.search)?);
        let llm = Arc::new(LlmClient::new(config.llm.clone())?);
        Ok(Self::new(config, search, llm))
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        Self::from_config(DetectorConfig::from_env())
    }

    /// Analyze `code` against the caller's snippets
    pub async fn detect_plagiarism(
        &self,
        code: &str,
        existing: &[ExistingSnippet],
        language: Option<&str>,
    ) -> PlagiarismVerdict {
        let mut submitted = SubmittedCode::new(code);
        if let Some(lang) = language {
            submitted = submitted.with_language(lang);
        }
        self.detect(&submitted, existing).await
    }

    /// Run the full pipeline. Operational failures never escape: the worst
    /// case is a fallback verdict with `ai_powered == false`.
    pub async fn detect(
        &self,
        submitted: &SubmittedCode,
        existing: &[ExistingSnippet],
    ) -> PlagiarismVerdict {
        let internet = self.gatherer.gather(submitted).await;

        let corpus = build_corpus(existing, &internet.matches);
        if corpus.is_empty() {
            info!("No snippets to compare against, passing submission");
            return empty_corpus_verdict();
        }
        let corpus = bound_corpus(corpus, self.config.max_corpus_size);

        let verdict = match self
            .analyzer
            .analyze(submitted, &corpus, internet.found)
            .await
        {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("AI analysis failed, using basic detection: {}", e);
                fallback_verdict(
                    &submitted.code,
                    existing,
                    &self.config.thresholds,
                    self.config.max_matches,
                    internet.found,
                )
            }
        };

        info!(
            status = %verdict.status,
            similarity = verdict.similarity,
            ai_powered = verdict.ai_powered,
            internet_searched = verdict.internet_searched,
            "Plagiarism check complete"
        );
        verdict
    }
}

fn empty_corpus_verdict() -> PlagiarismVerdict {
    PlagiarismVerdict {
        is_plagiarized: false,
        similarity: 0.0,
        status: Status::Pass,
        message: "No existing snippets to compare against - no plagiarism detected".to_string(),
        matches: Vec::new(),
        analysis: None,
        ai_powered: false,
        internet_searched: true,
    }
}
