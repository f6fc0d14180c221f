#![deny(missing_docs)]

//! Core library for the docsum document summarization server.

/// HTTP routing and request handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Plain-text extraction for PDF, DOCX, PPTX and TXT uploads.
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization counters.
pub mod metrics;
/// Upload-to-summary pipeline orchestration.
pub mod processing;
/// Word-frequency extractive summarization.
pub mod summarization;
