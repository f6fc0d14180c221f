//! Command-line entrypoint.
//!
//! Summarizes a local file through the same extraction and ranking pipeline as the HTTP server
//! and prints the summary, or the JSON body the server would return with `--json`.
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use docsum::{
    api::SummaryResponse,
    config::DEFAULT_SUMMARY_SENTENCE_COUNT,
    logging,
    processing::{UploadedDocument, summarize_document},
    summarization::Summarizer,
};

#[derive(Parser)]
#[command(
    name = "docsum-cli",
    about = "Summarize a PDF, DOCX, PPTX or TXT file"
)]
struct Cli {
    /// File to summarize; its extension selects the parser.
    path: PathBuf,
    /// Number of sentences to keep.
    #[arg(long, short, default_value_t = DEFAULT_SUMMARY_SENTENCE_COUNT)]
    sentences: usize,
    /// Print the JSON response body instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    logging::init_cli_tracing();
    let cli = Cli::parse();
    if cli.sentences == 0 {
        return Err(anyhow!("--sentences must be at least 1"));
    }

    let filename = cli
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid file name: {}", cli.path.display()))?
        .to_string();
    let bytes = std::fs::read(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;

    let document = UploadedDocument::new(filename, bytes);
    let outcome = summarize_document(&document, &Summarizer::shared(cli.sentences))?;
    let response = SummaryResponse::from(outcome);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.summary);
    }
    Ok(())
}
