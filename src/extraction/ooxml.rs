//! Shared helpers for Office Open XML packages (DOCX, PPTX).

use quick_xml::{NsReader, events::BytesStart, name::ResolveResult};
use std::io::{Cursor, Read};
use zip::ZipArchive;

use super::types::{DocumentFormat, ExtractionError};

/// A ZIP-backed OOXML package opened from in-memory bytes.
pub(super) struct Package<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    format: DocumentFormat,
}

impl<'a> Package<'a> {
    pub(super) fn open(bytes: &'a [u8], format: DocumentFormat) -> Result<Self, ExtractionError> {
        let archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::parser(format, e))?;
        Ok(Self { archive, format })
    }

    /// Read a package part as UTF-8 XML.
    pub(super) fn read_part(&mut self, name: &str) -> Result<String, ExtractionError> {
        let format = self.format;
        let mut part = self.archive.by_name(name).map_err(|e| {
            ExtractionError::parser(format, format!("missing part '{name}': {e}"))
        })?;
        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            ExtractionError::parser(format, format!("unreadable part '{name}': {e}"))
        })?;
        Ok(xml)
    }

    pub(super) fn format(&self) -> DocumentFormat {
        self.format
    }
}

/// XML vocabularies the extractors look at. Elements are matched on namespace URI, so any
/// prefix (or a default namespace) bound to the same URI is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Namespace {
    Word,
    Presentation,
    Drawing,
    Relationships,
    PackageRelationships,
    Other,
}

impl Namespace {
    fn from_uri(uri: &[u8]) -> Self {
        match uri {
            b"http://schemas.openxmlformats.org/wordprocessingml/2006/main" => Self::Word,
            b"http://schemas.openxmlformats.org/presentationml/2006/main" => Self::Presentation,
            b"http://schemas.openxmlformats.org/drawingml/2006/main" => Self::Drawing,
            b"http://schemas.openxmlformats.org/officeDocument/2006/relationships" => {
                Self::Relationships
            }
            b"http://schemas.openxmlformats.org/package/2006/relationships" => {
                Self::PackageRelationships
            }
            _ => Self::Other,
        }
    }

    fn from_resolved(resolved: &ResolveResult<'_>) -> Self {
        match resolved {
            ResolveResult::Bound(uri) => Self::from_uri(uri.as_ref()),
            _ => Self::Other,
        }
    }
}

/// Namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ElementName {
    namespace: Namespace,
    local: Vec<u8>,
}

impl ElementName {
    pub(super) fn is(&self, namespace: Namespace, local: &str) -> bool {
        self.namespace == namespace && self.local == local.as_bytes()
    }
}

/// Resolve the qualified name of an element just read from `reader`.
pub(super) fn resolve_element(reader: &NsReader<&[u8]>, element: &BytesStart<'_>) -> ElementName {
    let (resolved, local) = reader.resolve_element(element.name());
    ElementName {
        namespace: Namespace::from_resolved(&resolved),
        local: local.as_ref().to_vec(),
    }
}

/// Unescaped value of the namespaced attribute `namespace:local`, if present.
pub(super) fn namespaced_attribute(
    reader: &NsReader<&[u8]>,
    element: &BytesStart<'_>,
    namespace: Namespace,
    local: &str,
) -> Result<Option<String>, quick_xml::Error> {
    for attr in element.attributes() {
        let attr = attr?;
        let (resolved, name) = reader.resolve_attribute(attr.key);
        if Namespace::from_resolved(&resolved) == namespace && name.as_ref() == local.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Unescaped value of the unqualified attribute `name`, if present.
pub(super) fn attribute(
    element: &BytesStart<'_>,
    name: &[u8],
) -> Result<Option<String>, quick_xml::Error> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Build an in-memory package from `(part name, contents)` pairs.
#[cfg(test)]
pub(super) fn build_package(parts: &[(&str, &str)]) -> Vec<u8> {
    use std::io::Write;
    use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in parts {
        writer.start_file(*name, options).expect("start part");
        writer.write_all(contents.as_bytes()).expect("write part");
    }
    writer.finish().expect("finish package").into_inner()
}
