//! Query command - print the web search query for a submission

use anyhow::{Context, Result};
use snippet_guard::build_search_query;
use std::path::PathBuf;

pub fn run(code: PathBuf, language: Option<String>) -> Result<i32> {
    let source = std::fs::read_to_string(&code)
        .with_context(|| format!("Failed to read {}", code.display()))?;
    println!("{}", build_search_query(&source, language.as_deref()));
    Ok(0)
}
