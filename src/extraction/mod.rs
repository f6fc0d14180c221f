//! Plain-text extraction for uploaded documents.
//!
//! Each supported format has its own module; [`extract`] dispatches on a [`DocumentFormat`]
//! resolved from the upload's filename. PDF, DOCX and PPTX results are trimmed; plain text is
//! returned exactly as decoded.

mod docx;
mod ooxml;
mod pdf;
mod pptx;
mod text;
pub mod types;

pub use docx::extract_docx;
pub use pdf::extract_pdf;
pub use pptx::extract_pptx;
pub use text::extract_txt;
pub use types::{DocumentFormat, ExtractionError, UNSUPPORTED_FORMAT_MESSAGE};

/// Extract text from `bytes` using the parser for `format`.
pub fn extract(format: DocumentFormat, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Docx => extract_docx(bytes),
        DocumentFormat::Pptx => extract_pptx(bytes),
        DocumentFormat::Txt => extract_txt(bytes),
    }?;
    tracing::debug!(%format, chars = text.len(), "Extracted text");
    Ok(text)
}

/// Resolve the format from `filename` and extract text from `bytes`.
pub fn extract_from_upload(filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    let format =
        DocumentFormat::from_filename(filename).ok_or(ExtractionError::UnsupportedFormat)?;
    extract(format, bytes)
}
