//! Check command - run the full plagiarism pipeline on a submission

use crate::style::colors::*;
use crate::style::*;
use anyhow::{anyhow, Context, Result};
use snippet_guard::{
    DetectorConfig, ExistingSnippet, PlagiarismDetector, PlagiarismVerdict, Status, SubmittedCode,
};
use std::path::{Path, PathBuf};

pub async fn run(
    code: PathBuf,
    snippets: Option<PathBuf>,
    language: Option<String>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<i32> {
    if !code.exists() {
        return Err(anyhow!("File not found: {}", code.display()));
    }
    let source = std::fs::read_to_string(&code)
        .with_context(|| format!("Failed to read {}", code.display()))?;

    let existing = match snippets {
        Some(path) => load_snippets(&path)?,
        None => Vec::new(),
    };

    let config = match config {
        Some(path) => DetectorConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DetectorConfig::from_env(),
    };

    let mut submitted = SubmittedCode::new(source);
    if let Some(lang) = language {
        submitted = submitted.with_language(lang);
    }

    let detector = PlagiarismDetector::from_config(config)?;
    let verdict = detector.detect(&submitted, &existing).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        print_verdict(&code, existing.len(), &verdict);
    }

    Ok(exit_code(verdict.status))
}

fn load_snippets(path: &Path) -> Result<Vec<ExistingSnippet>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid snippets file {}", path.display()))
}

fn exit_code(status: Status) -> i32 {
    match status {
        Status::Pass => 0,
        Status::Review => 2,
        Status::Fail => 3,
    }
}

fn print_verdict(code: &Path, compared: usize, verdict: &PlagiarismVerdict) {
    print_header("Plagiarism Check");

    print_key_value("File", &code.display().to_string());
    print_key_value("Local snippets", &compared.to_string());
    print_key_value(
        "Method",
        if verdict.ai_powered {
            "AI analysis"
        } else {
            "Basic detection"
        },
    );
    print_key_value(
        "Internet search",
        if verdict.internet_searched { "yes" } else { "no" },
    );
    println!();

    let color = status_color(verdict.status);
    print_key_value_colored("Status", verdict.status.as_str(), color);
    println!(
        "  {}Similarity:{} {} {:.0}%",
        GRAY,
        RESET,
        similarity_bar(verdict.similarity, verdict.status, 30),
        verdict.similarity * 100.0
    );
    println!();
    println!("  {} {}", status_icon(verdict.status), verdict.message);

    if let Some(analysis) = &verdict.analysis {
        print_section("Analysis");
        println!("  {}", analysis);
    }

    if !verdict.matches.is_empty() {
        print_section("Matches");
        for m in &verdict.matches {
            println!(
                "  {} {} {}({:.0}%){}",
                icon_bullet(),
                m.title,
                GRAY,
                m.similarity * 100.0,
                RESET
            );
            println!("      {} {} [{}]", style_dim("by"), m.author, m.provenance);
            if let Some(url) = &m.source_url {
                println!("      {}", style_cyan(url));
            }
            println!("      {}", style_dim(&m.explanation));
        }
    }
    println!();
}
