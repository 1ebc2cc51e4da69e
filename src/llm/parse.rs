//! AI response parsing
//!
//! Models do not always honour "JSON only". Each `ParseStrategy` is one way
//! of recovering the verdict object from raw output; they are tried in
//! order and the first success wins.

use crate::error::AnalyzerError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Fenced block with its info string (possibly empty) and body
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_+-]*)[ \t]*(.*?)```").expect("valid fenced block regex")
});

static FIRST_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"));

/// Verdict as returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    pub overall_similarity: f64,
    #[serde(default)]
    pub is_plagiarized: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches: Vec<AiMatch>,
}

/// One match as returned by the model. Only `snippet_id`, `similarity` and
/// `explanation` are used; everything else is re-resolved from the corpus.
/// Field shapes are loose so one odd match cannot sink the whole verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMatch {
    #[serde(default, deserialize_with = "loose_string")]
    pub snippet_id: String,
    #[serde(default, deserialize_with = "loose_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub similarity: f64,
    #[serde(default, deserialize_with = "loose_string")]
    pub explanation: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings as-is, numbers and other scalars stringified, null as empty
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn loose_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = loose_string(deserializer)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

/// Numbers, numeric strings; anything else is 0
fn loose_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

/// Bodies of fenced blocks tagged `json` first, then untagged ones
fn fenced_candidates(raw: &str) -> Vec<&str> {
    let blocks: Vec<(&str, &str)> = FENCED_BLOCK
        .captures_iter(raw)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str().trim())))
        .collect();
    let tagged = blocks
        .iter()
        .filter(|(tag, _)| tag.eq_ignore_ascii_case("json"));
    let untagged = blocks.iter().filter(|(tag, _)| tag.is_empty());
    tagged.chain(untagged).map(|(_, body)| *body).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The whole response is JSON
    Direct,
    /// JSON inside a ```json fenced block
    FencedBlock,
    /// First `{` through last `}` in the text
    FirstObject,
}

impl ParseStrategy {
    pub const ALL: [ParseStrategy; 3] = [
        ParseStrategy::Direct,
        ParseStrategy::FencedBlock,
        ParseStrategy::FirstObject,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParseStrategy::Direct => "direct",
            ParseStrategy::FencedBlock => "fenced_block",
            ParseStrategy::FirstObject => "first_object",
        }
    }

    /// `None` when this strategy cannot recover a verdict
    pub fn attempt(&self, raw: &str) -> Option<AiResponse> {
        match self {
            ParseStrategy::Direct => serde_json::from_str(raw.trim()).ok(),
            ParseStrategy::FencedBlock => fenced_candidates(raw)
                .into_iter()
                .find_map(|body| serde_json::from_str(body).ok()),
            ParseStrategy::FirstObject => {
                serde_json::from_str(FIRST_OBJECT.find(raw)?.as_str()).ok()
            }
        }
    }
}

/// Try every strategy in order
pub fn parse_ai_response(raw: &str) -> Result<AiResponse, AnalyzerError> {
    ParseStrategy::ALL
        .iter()
        .find_map(|strategy| {
            let parsed = strategy.attempt(raw);
            if parsed.is_some() {
                debug!("AI response parsed with {} strategy", strategy.name());
            }
            parsed
        })
        .ok_or_else(|| {
            AnalyzerError::Parse(format!(
                "no JSON verdict found in response: {}",
                &raw.chars().take(200).collect::<String>()
            ))
        })
}
