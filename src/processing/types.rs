//! Core data types and error definitions for the summarization pipeline.

use crate::extraction::ExtractionError;
use thiserror::Error;

/// A file received for summarization.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Declared filename; only its extension is used.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Bundle a filename with its contents.
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The document produced a summary.
    Summarized {
        /// Top-ranked sentences joined by single spaces.
        summary: String,
        /// Filename the summary was produced for.
        filename: String,
    },
    /// Extracted text was empty or whitespace only.
    NoContent,
}

/// Errors emitted by the summarization pipeline.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Dispatch or extraction failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// The pipeline could not run to completion.
    #[error("{0}")]
    Internal(String),
}
