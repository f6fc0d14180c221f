use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing summarization activity.
#[derive(Default)]
pub struct SummaryMetrics {
    documents_summarized: AtomicU64,
    empty_documents: AtomicU64,
    failed_requests: AtomicU64,
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document that produced a summary.
    pub fn record_summary(&self) {
        self.documents_summarized.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a document whose extracted text was empty.
    pub fn record_empty(&self) {
        self.empty_documents.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that ended in an error.
    pub fn record_failure(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_summarized: self.documents_summarized.load(Ordering::Relaxed),
            empty_documents: self.empty_documents.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of the counters used for reporting.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Documents summarized since startup.
    pub documents_summarized: u64,
    /// Uploads whose extracted text was empty.
    pub empty_documents: u64,
    /// Uploads that failed during dispatch, extraction, or summarization.
    pub failed_requests: u64,
}
