//! Search query construction

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of declared identifiers used in a query
const MAX_IDENTIFIERS: usize = 3;

/// Characters of cleaned code used when no identifier is found
const FALLBACK_QUERY_CHARS: usize = 200;

/// Appended to every query to bias results toward code hosts
pub const SITE_HINT: &str = "site:github.com OR site:stackoverflow.com";

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment regex"));

static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)//.*$").expect("valid line comment regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:function|def|class|const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)")
        .expect("valid declaration regex")
});

/// Strip comments and collapse whitespace
pub fn clean_code(code: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(code, " ");
    let without_lines = LINE_COMMENT.replace_all(&without_blocks, " ");
    WHITESPACE
        .replace_all(&without_lines, " ")
        .trim()
        .to_string()
}

/// Names following declaration keywords, in order of appearance, deduplicated
pub fn declared_identifiers(cleaned: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in DECLARATION.captures_iter(cleaned) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        if names.len() == MAX_IDENTIFIERS {
            break;
        }
    }
    names
}

/// Build the search query for a submission.
///
/// Uses up to three declared identifiers, or the first 200 characters of
/// cleaned code when there are none, prefixed with the language (if known)
/// and suffixed with a site hint.
pub fn build_search_query(code: &str, language: Option<&str>) -> String {
    let cleaned = clean_code(code);
    let identifiers = declared_identifiers(&cleaned);

    let core = if identifiers.is_empty() {
        cleaned.chars().take(FALLBACK_QUERY_CHARS).collect::<String>()
    } else {
        identifiers.join(" ")
    };

    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if let Some(lang) = language.map(str::trim).filter(|l| !l.is_empty()) {
        parts.push(lang);
    }
    let core = core.trim();
    if !core.is_empty() {
        parts.push(core);
    }
    parts.push(SITE_HINT);
    parts.join(" ")
}
