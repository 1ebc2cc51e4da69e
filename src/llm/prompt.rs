//! Prompt contract for the similarity analysis

use crate::config::Thresholds;
use crate::types::CandidateSnippet;

/// System prompt. Embeds the scoring bands so the model classifies with the
/// same thresholds the detector enforces.
pub fn system_prompt(thresholds: &Thresholds) -> String {
    format!(
        r#"You are an expert code plagiarism detector for a code snippet marketplace.

Compare the SUBMITTED CODE against every CANDIDATE SNIPPET. Consider:
- Code structure and control flow
- Logic and algorithm choice
- Variable, function and type naming patterns
- Idioms, formatting habits and comments
Renamed identifiers, reordered statements or reformatted code still count as copying.

SCORING (similarity is a number between 0.0 and 1.0):
- 0.0-0.3: different implementations, at most common boilerplate
- 0.3-{review:.1}: some shared patterns, typical for the problem domain
- {review:.1}-{fail:.1}: substantial overlap that needs a human to decide
- {fail:.1}-1.0: near-identical or clearly derived code

STATUS:
- "PASS" when overallSimilarity < {review}
- "REVIEW" when {review} <= overallSimilarity <= {fail}
- "FAIL" when overallSimilarity > {fail}
isPlagiarized is true unless status is "PASS".

RESPONSE FORMAT (JSON only, no other text):
{{
  "overallSimilarity": 0.0,
  "isPlagiarized": false,
  "status": "PASS",
  "analysis": "short explanation of your reasoning",
  "matches": [
    {{"snippetId": "id of the candidate", "title": "candidate title", "similarity": 0.0, "explanation": "what is similar"}}
  ]
}}

RULES:
- overallSimilarity is the highest similarity to any single candidate
- List only candidates with meaningful similarity, most similar first
- Use the candidate ids exactly as given
- Respond with valid JSON only"#,
        review = thresholds.review,
        fail = thresholds.fail,
    )
}

/// User message: the submission followed by every candidate
pub fn build_user_message(code: &str, language: Option<&str>, candidates: &[CandidateSnippet]) -> String {
    let mut msg = String::from("SUBMITTED CODE");
    if let Some(lang) = language {
        msg.push_str(&format!(" ({})", lang));
    }
    msg.push_str(&format!(":\n```\n{}\n```\n\n", code));
    msg.push_str(&format!("CANDIDATE SNIPPETS ({}):\n", candidates.len()));

    for candidate in candidates {
        msg.push_str(&format!(
            "\n--- id: {} | title: {} | author: {} ---\n```\n{}\n```\n",
            candidate.id, candidate.title, candidate.author, candidate.code
        ));
    }

    msg
}
