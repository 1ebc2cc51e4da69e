//! Fallback Similarity Engine
//!
//! Deterministic lexical similarity used when the AI path is unavailable:
//! Jaccard similarity over whitespace-separated token sets of normalized
//! code. Only local snippets are compared; internet evidence is not
//! re-validated here.

use crate::config::Thresholds;
use crate::scoring::{fallback_message, status_for};
use crate::types::{ExistingSnippet, PlagiarismMatch, PlagiarismVerdict, Provenance};
use std::collections::HashSet;
use tracing::info;

/// Lowercase, trim, and collapse whitespace runs to single spaces
pub fn normalize_code(code: &str) -> String {
    code.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn token_set(normalized: &str) -> HashSet<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}

/// |A ∩ B| / |A ∪ B| over token sets; 0.0 when both are empty
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize_code(a);
    let norm_b = normalize_code(b);
    let set_a = token_set(&norm_a);
    let set_b = token_set(&norm_b);

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Score the submission against local snippets and build a verdict
pub fn fallback_verdict(
    submitted: &str,
    local: &[ExistingSnippet],
    thresholds: &Thresholds,
    max_matches: usize,
    internet_searched: bool,
) -> PlagiarismVerdict {
    let mut max_similarity: f64 = 0.0;
    let mut matches: Vec<PlagiarismMatch> = Vec::new();

    for snippet in local {
        let similarity = jaccard_similarity(submitted, &snippet.code);
        max_similarity = max_similarity.max(similarity);

        if similarity >= thresholds.fallback_match {
            matches.push(PlagiarismMatch {
                snippet_id: snippet.id.clone(),
                title: snippet.title.clone(),
                author: snippet.author.clone(),
                similarity,
                explanation: format!(
                    "Basic similarity check: {:.0}% token overlap",
                    similarity * 100.0
                ),
                provenance: Provenance::Database,
                source_url: None,
            });
        }
    }

    matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    matches.truncate(max_matches);

    let status = status_for(max_similarity, thresholds);
    info!(
        "Fallback analysis: similarity={:.2}, status={}, matches={}",
        max_similarity,
        status,
        matches.len()
    );

    PlagiarismVerdict {
        is_plagiarized: status.is_plagiarized(),
        similarity: max_similarity,
        status,
        message: fallback_message(status, max_similarity),
        matches,
        analysis: None,
        ai_powered: false,
        internet_searched,
    }
}
