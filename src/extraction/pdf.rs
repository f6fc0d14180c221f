use lopdf::Document;

use super::types::{DocumentFormat, ExtractionError};

/// Extract the text layer of every page, in page order, joined by newlines.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document =
        Document::load_mem(bytes).map_err(|e| ExtractionError::parser(DocumentFormat::Pdf, e))?;

    let mut pages = Vec::new();
    // `get_pages` is keyed by page number, so iteration follows document order.
    for page_number in document.get_pages().into_keys() {
        let text = document
            .extract_text(&[page_number])
            .map_err(|e| ExtractionError::parser(DocumentFormat::Pdf, e))?;
        pages.push(text);
    }

    tracing::debug!(pages = pages.len(), "Extracted PDF text");
    Ok(pages.join("\n").trim().to_string())
}
