use super::types::ExtractionError;

/// Decode a plain-text upload as UTF-8 without trimming.
pub fn extract_txt(bytes: &[u8]) -> Result<String, ExtractionError> {
    Ok(std::str::from_utf8(bytes)?.to_owned())
}
