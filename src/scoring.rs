//! Status bands for similarity scores
//!
//! The band thresholds are the authoritative contract for a verdict: both
//! the AI path and the fallback path derive their status here rather than
//! trusting a model's own classification.

use crate::config::Thresholds;
use crate::types::Status;

/// Appended to the message when the fallback engine produced the verdict
pub const FALLBACK_NOTE: &str = "AI analysis unavailable - basic detection used";

/// Clamp a score into [0, 1]; NaN becomes 0
pub fn clamp_similarity(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Map a similarity score onto PASS / REVIEW / FAIL
pub fn status_for(similarity: f64, thresholds: &Thresholds) -> Status {
    if similarity < thresholds.review {
        Status::Pass
    } else if similarity <= thresholds.fail {
        Status::Review
    } else {
        Status::Fail
    }
}

/// Human-readable message for a status
pub fn status_message(status: Status, similarity: f64) -> String {
    let percent = (similarity * 100.0).round();
    match status {
        Status::Pass => format!(
            "No significant plagiarism detected ({}% similarity)",
            percent
        ),
        Status::Review => format!(
            "Moderate similarity detected ({}%) - manual review recommended",
            percent
        ),
        Status::Fail => format!(
            "High similarity detected ({}%) - likely plagiarized",
            percent
        ),
    }
}

pub fn fallback_message(status: Status, similarity: f64) -> String {
    format!("{} ({})", status_message(status, similarity), FALLBACK_NOTE)
}
