//! Comparison corpus construction
//!
//! Local snippets first, internet matches second, in input order. The list
//! is bounded before it is sent to the LLM so the prompt stays within the
//! model's context window.

use crate::types::{CandidateSnippet, ExistingSnippet, InternetMatch, Provenance};

/// Id given to the internet match at `index`
pub fn internet_candidate_id(index: usize) -> String {
    format!("internet-{}", index)
}

/// Merge local snippets and internet matches into one list of candidates
pub fn build_corpus(local: &[ExistingSnippet], internet: &[InternetMatch]) -> Vec<CandidateSnippet> {
    let mut corpus: Vec<CandidateSnippet> = Vec::with_capacity(local.len() + internet.len());
    corpus.extend(local.iter().map(CandidateSnippet::from));
    corpus.extend(
        internet
            .iter()
            .enumerate()
            .map(|(index, m)| CandidateSnippet {
                id: internet_candidate_id(index),
                title: m.title.clone(),
                code: m.snippet.clone(),
                author: m.source.to_string(),
                provenance: Provenance::Internet,
                source_url: Some(m.url.clone()),
            }),
    );
    corpus
}

/// Keep the first `max` candidates; no re-ranking
pub fn bound_corpus(mut corpus: Vec<CandidateSnippet>, max: usize) -> Vec<CandidateSnippet> {
    corpus.truncate(max);
    corpus
}
