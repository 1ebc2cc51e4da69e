//! Snippet plagiarism detection for the code snippet marketplace
//!
//! Checks a submitted snippet against the marketplace's existing snippets
//! and similar public code found on the web, and returns a verdict with a
//! similarity score, a PASS/REVIEW/FAIL status, and ranked evidence.
//!
//! ## Module Structure
//!
//! - `types`: inputs, candidates, matches and verdicts
//! - `config`: thresholds and provider settings
//! - `error`: error types
//! - `scoring`: status bands and messages
//! - `search`: internet evidence gathering
//! - `corpus`: comparison corpus construction
//! - `llm`: AI similarity analysis
//! - `fallback`: deterministic Jaccard similarity
//! - `detector`: the pipeline tying it all together

pub mod config;
pub mod corpus;
pub mod detector;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod scoring;
pub mod search;
pub mod types;

pub use config::{DetectorConfig, LlmConfig, SearchConfig, Thresholds};
pub use detector::PlagiarismDetector;
pub use error::{AnalyzerError, ConfigError, SearchError};
pub use fallback::jaccard_similarity;
pub use search::build_search_query;
pub use types::{
    CandidateSnippet, ExistingSnippet, InternetMatch, InternetSearchResult, MatchSource,
    PlagiarismMatch, PlagiarismVerdict, Provenance, Status, SubmittedCode,
};
