//! snippet-guard - check code snippets for plagiarism

mod commands;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "snippet-guard",
    version,
    about = "Plagiarism detection for marketplace code snippets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a submission against existing snippets and the web
    Check {
        /// File containing the submitted code
        #[arg(short, long)]
        code: PathBuf,

        /// JSON file with existing snippets: [{id, title, code, author}]
        #[arg(short, long)]
        snippets: Option<PathBuf>,

        /// Declared language of the submission
        #[arg(short, long)]
        language: Option<String>,

        /// TOML configuration file
        #[arg(long, env = "SNIPPET_GUARD_CONFIG")]
        config: Option<PathBuf>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Lexical (Jaccard) similarity between two files
    Compare { first: PathBuf, second: PathBuf },

    /// Show the web search query built for a submission
    Query {
        #[arg(short, long)]
        code: PathBuf,

        #[arg(short, long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            style::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            code,
            snippets,
            language,
            config,
            json,
        } => commands::check::run(code, snippets, language, config, json).await,
        Commands::Compare { first, second } => commands::compare::run(first, second),
        Commands::Query { code, language } => commands::query::run(code, language),
    }
}
