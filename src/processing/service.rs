//! Summary service coordinating dispatch, extraction, and summarization.

use crate::{
    config::get_config,
    extraction::{self, ExtractionError},
    metrics::{MetricsSnapshot, SummaryMetrics},
    processing::types::{SummarizeError, SummaryOutcome, UploadedDocument},
    summarization::{Summarizer, has_content},
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Runs the full pipeline for one upload: dispatch on the filename, extract text, and
/// summarize it.
///
/// Extraction and scoring are CPU bound, so each request runs on the blocking thread pool.
/// Construct the service once near process start and share it through an `Arc`.
pub struct SummaryService {
    sentence_count: usize,
    metrics: Arc<SummaryMetrics>,
}

/// Abstraction over the pipeline used by the HTTP surface.
#[async_trait]
pub trait SummarizeApi: Send + Sync {
    /// Extract and summarize an uploaded document.
    async fn summarize(&self, document: UploadedDocument) -> Result<SummaryOutcome, SummarizeError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl SummaryService {
    /// Build a service using the configured summary length.
    pub fn new() -> Self {
        Self::with_sentence_count(get_config().summary_sentence_count)
    }

    /// Build a service keeping at most `sentence_count` sentences per summary.
    pub fn with_sentence_count(sentence_count: usize) -> Self {
        Self {
            sentence_count,
            metrics: Arc::new(SummaryMetrics::new()),
        }
    }

    fn record(&self, result: &Result<SummaryOutcome, SummarizeError>) {
        match result {
            Ok(SummaryOutcome::Summarized { .. }) => self.metrics.record_summary(),
            Ok(SummaryOutcome::NoContent) => self.metrics.record_empty(),
            Err(_) => self.metrics.record_failure(),
        }
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SummarizeApi for SummaryService {
    async fn summarize(
        &self,
        document: UploadedDocument,
    ) -> Result<SummaryOutcome, SummarizeError> {
        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            filename = %document.filename,
            bytes = document.bytes.len(),
            "Summarizing upload"
        );

        let sentence_count = self.sentence_count;
        let result = tokio::task::spawn_blocking(move || {
            summarize_document(&document, &Summarizer::shared(sentence_count))
        })
        .await
        .map_err(|error| SummarizeError::Internal(format!("summarization task failed: {error}")))
        .and_then(|outcome| outcome.map_err(SummarizeError::from));

        self.record(&result);
        match &result {
            Ok(SummaryOutcome::Summarized { summary, .. }) => {
                tracing::info!(%request_id, summary_chars = summary.len(), "Summary produced");
            }
            Ok(SummaryOutcome::NoContent) => {
                tracing::info!(%request_id, "Document has no extractable text");
            }
            Err(error) => tracing::warn!(%request_id, %error, "Summarization failed"),
        }
        result
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Run dispatch, extraction, the empty-content check and summarization synchronously.
pub fn summarize_document(
    document: &UploadedDocument,
    summarizer: &Summarizer<'_>,
) -> Result<SummaryOutcome, ExtractionError> {
    let text = extraction::extract_from_upload(&document.filename, &document.bytes)?;

    if !has_content(&text) {
        return Ok(SummaryOutcome::NoContent);
    }

    Ok(SummaryOutcome::Summarized {
        summary: summarizer.summarize(&text),
        filename: document.filename.clone(),
    })
}
