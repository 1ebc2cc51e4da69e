//! Core types for snippet plagiarism analysis
//!
//! Every value here lives for a single analysis call: built from the
//! caller's input, used by the pipeline, and dropped once the verdict
//! has been returned.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Inputs
// ============================================================================

/// Code under review, with an optional declared language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedCode {
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl SubmittedCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.language = if language.trim().is_empty() {
            None
        } else {
            Some(language)
        };
        self
    }
}

/// A snippet already stored in the marketplace, supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingSnippet {
    pub id: String,
    pub title: String,
    pub code: String,
    pub author: String,
}

impl ExistingSnippet {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        code: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            code: code.into(),
            author: author.into(),
        }
    }
}

// ============================================================================
// Internet evidence
// ============================================================================

/// Where an internet match was found, derived from its URL host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Github,
    Stackoverflow,
    Gitlab,
    Bitbucket,
    Web,
}

impl MatchSource {
    /// Classify a URL by substring match on well-known code hosts
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("github.com") {
            MatchSource::Github
        } else if url.contains("stackoverflow.com") {
            MatchSource::Stackoverflow
        } else if url.contains("gitlab.com") {
            MatchSource::Gitlab
        } else if url.contains("bitbucket.org") {
            MatchSource::Bitbucket
        } else {
            MatchSource::Web
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchSource::Github => "github",
            MatchSource::Stackoverflow => "stackoverflow",
            MatchSource::Gitlab => "gitlab",
            MatchSource::Bitbucket => "bitbucket",
            MatchSource::Web => "web",
        }
    }
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A public page that looks similar to the submitted code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternetMatch {
    pub url: String,
    pub title: String,
    /// Excerpt of the page content returned by the search provider
    pub snippet: String,
    pub relevance_score: f64,
    pub source: MatchSource,
}

/// Outcome of the internet evidence step. Never an error: a failed search
/// is reported as `found == false` with no matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternetSearchResult {
    pub found: bool,
    pub matches: Vec<InternetMatch>,
    pub total_results: usize,
}

impl InternetSearchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_matches(matches: Vec<InternetMatch>) -> Self {
        Self {
            found: !matches.is_empty(),
            total_results: matches.len(),
            matches,
        }
    }
}

// ============================================================================
// Comparison corpus
// ============================================================================

/// Origin of a candidate snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Database,
    Internet,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Database => f.write_str("database"),
            Provenance::Internet => f.write_str("internet"),
        }
    }
}

/// Uniform record for anything the submission is compared against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSnippet {
    pub id: String,
    pub title: String,
    pub code: String,
    pub author: String,
    pub provenance: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl From<&ExistingSnippet> for CandidateSnippet {
    fn from(snippet: &ExistingSnippet) -> Self {
        Self {
            id: snippet.id.clone(),
            title: snippet.title.clone(),
            code: snippet.code.clone(),
            author: snippet.author.clone(),
            provenance: Provenance::Database,
            source_url: None,
        }
    }
}

// ============================================================================
// Verdict
// ============================================================================

/// Plagiarism status band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Review,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Review => "REVIEW",
            Status::Fail => "FAIL",
        }
    }

    pub fn is_plagiarized(&self) -> bool {
        !matches!(self, Status::Pass)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked piece of evidence in a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismMatch {
    pub snippet_id: String,
    pub title: String,
    pub author: String,
    /// Similarity in [0, 1]
    pub similarity: f64,
    pub explanation: String,
    pub provenance: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Final output of one plagiarism analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismVerdict {
    pub is_plagiarized: bool,
    /// Overall similarity in [0, 1]
    pub similarity: f64,
    pub status: Status,
    pub message: String,
    pub matches: Vec<PlagiarismMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    pub ai_powered: bool,
    pub internet_searched: bool,
}
