//! AI Similarity Analyzer
//!
//! Sends the submission and the bounded corpus to the LLM, parses the
//! structured verdict, and maps it back onto the corpus.
//!
//! The model output is used as a ranking signal only: status comes from the
//! band thresholds, and author/provenance/URL come from the corpus entry
//! matching each returned id. Ids the model invents are dropped.

use super::parse::{parse_ai_response, AiResponse};
use super::prompt::{build_user_message, system_prompt};
use super::{ChatMessage, ChatProvider, ChatRequest};
use crate::config::{LlmConfig, Thresholds};
use crate::error::AnalyzerError;
use crate::scoring::{clamp_similarity, status_for, status_message};
use crate::types::{CandidateSnippet, PlagiarismMatch, PlagiarismVerdict, SubmittedCode};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct AiSimilarityAnalyzer {
    provider: Arc<dyn ChatProvider>,
    thresholds: Thresholds,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    max_matches: usize,
}

impl AiSimilarityAnalyzer {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        llm: &LlmConfig,
        thresholds: Thresholds,
        max_matches: usize,
    ) -> Self {
        Self {
            provider,
            thresholds,
            temperature: llm.temperature.min(0.3),
            max_tokens: llm.max_tokens,
            timeout: Duration::from_secs(llm.timeout_secs),
            max_matches,
        }
    }

    pub fn build_request(&self, submitted: &SubmittedCode, corpus: &[CandidateSnippet]) -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage::system(&system_prompt(&self.thresholds)),
                ChatMessage::user(&build_user_message(
                    &submitted.code,
                    submitted.language.as_deref(),
                    corpus,
                )),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_response: true,
        }
    }

    /// Run one analysis. Any error here sends the detector to the fallback path.
    pub async fn analyze(
        &self,
        submitted: &SubmittedCode,
        corpus: &[CandidateSnippet],
        internet_searched: bool,
    ) -> Result<PlagiarismVerdict, AnalyzerError> {
        let request = self.build_request(submitted, corpus);

        debug!("Requesting AI analysis against {} candidates", corpus.len());
        let raw = tokio::time::timeout(self.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| AnalyzerError::Timeout)??;

        let response = parse_ai_response(&raw)?;
        Ok(self.map_response(response, corpus, internet_searched))
    }

    pub fn map_response(
        &self,
        response: AiResponse,
        corpus: &[CandidateSnippet],
        internet_searched: bool,
    ) -> PlagiarismVerdict {
        let similarity = clamp_similarity(response.overall_similarity);
        let status = status_for(similarity, &self.thresholds);

        if let Some(model_status) = response.status.as_deref() {
            if !model_status.eq_ignore_ascii_case(status.as_str()) {
                debug!(
                    "Model status {} disagrees with band status {} for similarity {:.2}",
                    model_status, status, similarity
                );
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut matches: Vec<PlagiarismMatch> = Vec::new();
        for ai_match in &response.matches {
            if matches.len() == self.max_matches {
                break;
            }
            let Some(candidate) = corpus.iter().find(|c| c.id == ai_match.snippet_id) else {
                warn!("AI returned unknown snippet id {}", ai_match.snippet_id);
                continue;
            };
            if !seen.insert(candidate.id.as_str()) {
                continue;
            }
            let explanation = if ai_match.explanation.trim().is_empty() {
                "No explanation provided".to_string()
            } else {
                ai_match.explanation.clone()
            };
            matches.push(PlagiarismMatch {
                snippet_id: candidate.id.clone(),
                title: candidate.title.clone(),
                author: candidate.author.clone(),
                similarity: clamp_similarity(ai_match.similarity),
                explanation,
                provenance: candidate.provenance,
                source_url: candidate.source_url.clone(),
            });
        }

        info!(
            "AI analysis: similarity={:.2}, status={}, matches={}",
            similarity,
            status,
            matches.len()
        );

        PlagiarismVerdict {
            is_plagiarized: status.is_plagiarized(),
            similarity,
            status,
            message: status_message(status, similarity),
            matches,
            analysis: response.analysis.filter(|a| !a.trim().is_empty()),
            ai_powered: true,
            internet_searched,
        }
    }
}
