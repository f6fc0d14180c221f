//! Document formats and extraction error definitions.

use std::fmt;
use thiserror::Error;

/// Message returned when an upload's extension is not recognized.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Unsupported file format. Supported: PDF, DOCX, PPTX, TXT";

/// Document formats accepted for summarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processing document.
    Docx,
    /// Office Open XML presentation.
    Pptx,
    /// UTF-8 plain text.
    Txt,
}

impl DocumentFormat {
    /// Suffixes in the order they are checked.
    const SUFFIXES: [(&'static str, DocumentFormat); 4] = [
        (".pdf", DocumentFormat::Pdf),
        (".docx", DocumentFormat::Docx),
        (".pptx", DocumentFormat::Pptx),
        (".txt", DocumentFormat::Txt),
    ];

    /// Resolve the format from a filename suffix (case-sensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::SUFFIXES
            .iter()
            .find(|(suffix, _)| filename.ends_with(suffix))
            .map(|(_, format)| *format)
    }

    /// Upper-case label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Pptx => "PPTX",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors produced while turning uploaded bytes into plain text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Filename did not end in a supported extension.
    #[error("{UNSUPPORTED_FORMAT_MESSAGE}")]
    UnsupportedFormat,
    /// The format parser rejected the document.
    #[error("Error extracting text from {format}: {message}")]
    Extraction {
        /// Format whose parser failed.
        format: DocumentFormat,
        /// Message reported by the underlying parser.
        message: String,
    },
    /// A plain-text upload was not valid UTF-8.
    #[error("{0}")]
    Decode(#[from] std::str::Utf8Error),
}

impl ExtractionError {
    pub(crate) fn parser(format: DocumentFormat, error: impl fmt::Display) -> Self {
        Self::Extraction {
            format,
            message: error.to_string(),
        }
    }
}
