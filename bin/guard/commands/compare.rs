//! Compare command - lexical similarity between two files

use crate::style::*;
use anyhow::{Context, Result};
use snippet_guard::scoring::status_for;
use snippet_guard::{jaccard_similarity, Thresholds};
use std::path::PathBuf;

pub fn run(first: PathBuf, second: PathBuf) -> Result<i32> {
    let a = std::fs::read_to_string(&first)
        .with_context(|| format!("Failed to read {}", first.display()))?;
    let b = std::fs::read_to_string(&second)
        .with_context(|| format!("Failed to read {}", second.display()))?;

    let similarity = jaccard_similarity(&a, &b);
    let status = status_for(similarity, &Thresholds::default());

    print_header("Token Similarity");
    print_key_value("First", &first.display().to_string());
    print_key_value("Second", &second.display().to_string());
    println!(
        "  {} {:.1}% ({})",
        similarity_bar(similarity, status, 30),
        similarity * 100.0,
        status
    );
    println!();

    Ok(0)
}
