//! End-to-end tests for the plagiarism detection pipeline

use async_trait::async_trait;
use httpmock::prelude::*;
use serde_json::json;
use snippet_guard::llm::{ChatProvider, ChatRequest};
use snippet_guard::search::{RawSearchResult, SearchProvider, SearchRequest};
use snippet_guard::{
    AnalyzerError, DetectorConfig, ExistingSnippet, LlmConfig, PlagiarismDetector, Provenance,
    SearchConfig, SearchError, Status, SubmittedCode,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Fakes
// ============================================================================

struct FakeSearch {
    results: Result<Vec<RawSearchResult>, SearchError>,
}

impl FakeSearch {
    fn none() -> Arc<Self> {
        Arc::new(Self {
            results: Ok(Vec::new()),
        })
    }

    fn returning(results: Vec<RawSearchResult>) -> Arc<Self> {
        Arc::new(Self {
            results: Ok(results),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            results: Err(SearchError::Transport("dns failure".to_string())),
        })
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn search(&self, _request: &SearchRequest) -> Result<Vec<RawSearchResult>, SearchError> {
        match &self.results {
            Ok(results) => Ok(results.clone()),
            Err(e) => Err(SearchError::Transport(e.to_string())),
        }
    }
}

struct FakeChat {
    reply: Result<String, AnalyzerError>,
    calls: AtomicUsize,
    last_user_message: Mutex<Option<String>>,
}

impl FakeChat {
    fn replying(content: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(content.to_string()),
            calls: AtomicUsize::new(0),
            last_user_message: Mutex::new(None),
        })
    }

    fn failing(err: AnalyzerError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
            last_user_message: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for FakeChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_message.lock().unwrap() =
            request.messages.last().map(|m| m.content.clone());
        self.reply.clone()
    }
}

fn snippet(id: &str, code: &str) -> ExistingSnippet {
    ExistingSnippet::new(id, format!("Snippet {}", id), code, format!("author-{}", id))
}

fn raw(url: &str, score: f64) -> RawSearchResult {
    RawSearchResult {
        url: url.to_string(),
        title: "Public answer".to_string(),
        content: "def add(a, b): return a + b".to_string(),
        score,
    }
}

fn detector(search: Arc<FakeSearch>, chat: Arc<FakeChat>) -> PlagiarismDetector {
    PlagiarismDetector::new(DetectorConfig::default(), search, chat)
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_empty_corpus_short_circuits() {
    let chat = FakeChat::replying(r#"{"overallSimilarity": 0.9}"#);
    let verdict = detector(FakeSearch::none(), chat.clone())
        .detect(&SubmittedCode::new("fn main() {}"), &[])
        .await;

    assert_eq!(verdict.status, Status::Pass);
    assert_eq!(verdict.similarity, 0.0);
    assert!(!verdict.ai_powered);
    assert!(verdict.internet_searched);
    assert!(!verdict.is_plagiarized);
    assert!(verdict.matches.is_empty());
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn test_empty_corpus_when_search_fails() {
    let chat = FakeChat::replying(r#"{"overallSimilarity": 0.9}"#);
    let verdict = detector(FakeSearch::failing(), chat.clone())
        .detect(&SubmittedCode::new("fn main() {}"), &[])
        .await;

    assert_eq!(verdict.status, Status::Pass);
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn test_near_duplicate_via_fallback() {
    let existing = vec![
        snippet("1", "function add(a, b) { return a + b; }"),
        snippet("2", "const greet = name => `hi ${name}`;"),
    ];
    let verdict = detector(FakeSearch::none(), FakeChat::failing(AnalyzerError::Timeout))
        .detect(
            &SubmittedCode::new("FUNCTION add(a, b) {\n    return a + b;\n}"),
            &existing,
        )
        .await;

    assert_eq!(verdict.similarity, 1.0);
    assert_eq!(verdict.status, Status::Fail);
    assert!(verdict.is_plagiarized);
    assert_eq!(verdict.matches[0].snippet_id, "1");
    assert_eq!(verdict.matches[0].author, "author-1");
}

#[tokio::test]
async fn test_unrelated_code_passes() {
    let existing = vec![snippet("1", "alpha beta gamma"), snippet("2", "delta epsilon")];
    let verdict = detector(FakeSearch::none(), FakeChat::failing(AnalyzerError::RateLimited))
        .detect(&SubmittedCode::new("one two three"), &existing)
        .await;

    assert_eq!(verdict.similarity, 0.0);
    assert_eq!(verdict.status, Status::Pass);
    assert!(!verdict.internet_searched);
}

#[tokio::test]
async fn test_timeout_degrades_to_fallback() {
    let existing = vec![snippet("1", "x = 1")];
    let verdict = detector(FakeSearch::none(), FakeChat::failing(AnalyzerError::Timeout))
        .detect(&SubmittedCode::new("x = 1"), &existing)
        .await;

    assert!(!verdict.ai_powered);
    assert!(!verdict.message.is_empty());
    assert!(verdict.message.contains("basic detection"));
    assert!(matches!(
        verdict.status,
        Status::Pass | Status::Review | Status::Fail
    ));
}

#[tokio::test]
async fn test_unparseable_ai_output_degrades_to_fallback() {
    let existing = vec![snippet("1", "x = 1")];
    let chat = FakeChat::replying("I think it looks fine!");
    let verdict = detector(FakeSearch::none(), chat.clone())
        .detect(&SubmittedCode::new("y = 2"), &existing)
        .await;

    assert_eq!(chat.calls(), 1);
    assert!(!verdict.ai_powered);
    assert_eq!(verdict.status, Status::Pass);
}

#[tokio::test]
async fn test_fallback_ignores_internet_matches_but_reports_search() {
    let search = FakeSearch::returning(vec![raw("https://github.com/x/add", 0.95)]);
    let existing = vec![snippet("1", "unrelated tokens only")];
    let verdict = detector(search, FakeChat::failing(AnalyzerError::InvalidApiKey))
        .detect(&SubmittedCode::new("def add(a, b): return a + b"), &existing)
        .await;

    assert!(!verdict.ai_powered);
    assert!(verdict.internet_searched);
    assert_eq!(verdict.status, Status::Pass);
    assert!(verdict
        .matches
        .iter()
        .all(|m| m.provenance == Provenance::Database));
}

#[tokio::test]
async fn test_internet_only_corpus_reaches_ai() {
    let search = FakeSearch::returning(vec![
        raw("https://stackoverflow.com/q/1", 0.9),
        raw("https://medium.com/low", 0.2),
    ]);
    let chat = FakeChat::replying(
        r#"{"overallSimilarity": 0.65, "status": "REVIEW", "analysis": "same helper",
            "matches": [{"snippetId": "internet-0", "similarity": 0.65, "explanation": "same body"}]}"#,
    );
    let verdict = detector(search, chat.clone())
        .detect(&SubmittedCode::new("def add(a, b): return a + b"), &[])
        .await;

    assert_eq!(chat.calls(), 1);
    assert!(verdict.ai_powered);
    assert!(verdict.internet_searched);
    assert_eq!(verdict.status, Status::Review);
    assert_eq!(verdict.matches.len(), 1);
    let m = &verdict.matches[0];
    assert_eq!(m.provenance, Provenance::Internet);
    assert_eq!(m.author, "stackoverflow");
    assert_eq!(m.source_url.as_deref(), Some("https://stackoverflow.com/q/1"));

    let prompt = chat.last_user_message.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("internet-0"));
    assert!(!prompt.contains("internet-1"));
}

#[tokio::test]
async fn test_corpus_bounded_before_ai() {
    let existing: Vec<ExistingSnippet> = (0..20)
        .map(|i| snippet(&format!("db-{}", i), "code"))
        .collect();
    let chat = FakeChat::replying(r#"{"overallSimilarity": 0.1}"#);
    detector(FakeSearch::none(), chat.clone())
        .detect(&SubmittedCode::new("x"), &existing)
        .await;

    let prompt = chat.last_user_message.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("CANDIDATE SNIPPETS (15)"));
    assert!(prompt.contains("id: db-14 "));
    assert!(!prompt.contains("id: db-15 "));
}

#[tokio::test]
async fn test_fallback_match_cap() {
    let existing: Vec<ExistingSnippet> = (0..12)
        .map(|i| snippet(&i.to_string(), "let total = a + b;"))
        .collect();
    let verdict = detector(FakeSearch::none(), FakeChat::failing(AnalyzerError::RateLimited))
        .detect(&SubmittedCode::new("let total = a + b;"), &existing)
        .await;

    assert!(verdict.matches.len() <= 5);
    assert_eq!(verdict.matches.len(), 5);
    for pair in verdict.matches.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[tokio::test]
async fn test_detect_plagiarism_entry_point() {
    let existing = vec![snippet("1", "print('hello world')")];
    let verdict = detector(FakeSearch::none(), FakeChat::failing(AnalyzerError::Timeout))
        .detect_plagiarism("print('hello world')", &existing, Some("python"))
        .await;

    assert_eq!(verdict.status, Status::Fail);
    assert!(!verdict.ai_powered);
}

// ============================================================================
// HTTP providers
// ============================================================================

fn http_config(server: &MockServer, llm_key: &str) -> DetectorConfig {
    DetectorConfig {
        llm: LlmConfig {
            api_base: server.base_url(),
            api_key: llm_key.to_string(),
            ..LlmConfig::default()
        },
        search: SearchConfig {
            api_base: server.base_url(),
            api_key: "tvly-test".to_string(),
            ..SearchConfig::default()
        },
        ..DetectorConfig::default()
    }
}

#[tokio::test]
async fn test_http_pipeline_ai_path() {
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(200).json_body(json!({
            "results": [{"url": "https://github.com/x/y", "title": "y", "content": "fn y() {}", "score": 0.8}]
        }));
    });
    let content = json!({
        "overallSimilarity": 0.2,
        "isPlagiarized": false,
        "status": "PASS",
        "analysis": "different approach",
        "matches": []
    })
    .to_string();
    let chat = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(json!({"choices": [{"message": {"content": content}}]}));
    });

    let detector = PlagiarismDetector::from_config(http_config(&server, "sk-test")).unwrap();
    let verdict = detector
        .detect(&SubmittedCode::new("fn x() {}"), &[snippet("1", "fn z() {}")])
        .await;

    search.assert();
    chat.assert();
    assert!(verdict.ai_powered);
    assert!(verdict.internet_searched);
    assert_eq!(verdict.status, Status::Pass);
    assert_eq!(verdict.analysis.as_deref(), Some("different approach"));
}

#[tokio::test]
async fn test_http_pipeline_missing_llm_key_uses_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(500);
    });
    let chat = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200);
    });

    let detector = PlagiarismDetector::from_config(http_config(&server, "")).unwrap();
    let verdict = detector
        .detect(&SubmittedCode::new("a b c"), &[snippet("1", "a b c")])
        .await;

    chat.assert_hits(0);
    assert!(!verdict.ai_powered);
    assert!(!verdict.internet_searched);
    assert_eq!(verdict.status, Status::Fail);
}

#[tokio::test]
async fn test_http_pipeline_rate_limited_uses_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(200).json_body(json!({"results": []}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(429);
    });

    let detector = PlagiarismDetector::from_config(http_config(&server, "sk-test")).unwrap();
    let verdict = detector
        .detect(&SubmittedCode::new("q r s"), &[snippet("1", "x y z")])
        .await;

    assert!(!verdict.ai_powered);
    assert_eq!(verdict.status, Status::Pass);
    assert!(verdict.message.contains("basic detection"));
}
