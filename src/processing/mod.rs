//! Summarization pipeline: format dispatch, text extraction, and sentence ranking.

mod service;
pub mod types;

pub use service::{SummarizeApi, SummaryService, summarize_document};
pub use types::{SummarizeError, SummaryOutcome, UploadedDocument};
