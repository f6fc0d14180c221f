use quick_xml::{
    NsReader,
    events::{BytesStart, Event},
};

use super::ooxml::{ElementName, Namespace, Package, namespaced_attribute, resolve_element};
use super::types::{DocumentFormat, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the text of every top-level body paragraph, joined by newlines.
///
/// Paragraphs nested in tables, text boxes, headers and footers are not included.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut package = Package::open(bytes, DocumentFormat::Docx)?;
    let xml = package.read_part(DOCUMENT_PART)?;
    let paragraphs =
        body_paragraphs(&xml).map_err(|e| ExtractionError::parser(package.format(), e))?;

    tracing::debug!(paragraphs = paragraphs.len(), "Extracted DOCX text");
    Ok(paragraphs.join("\n").trim().to_string())
}

fn body_paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = NsReader::from_str(xml);
    let mut path: Vec<ElementName> = Vec::new();
    let mut paragraphs = Vec::new();
    // Text of the open paragraph and its index in `path`.
    let mut current: Option<(String, usize)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = resolve_element(&reader, &element);
                if current.is_none() && name.is(Namespace::Word, "p") && at_body_level(&path) {
                    current = Some((String::new(), path.len()));
                }
                path.push(name);
            }
            Event::Empty(element) => {
                let name = resolve_element(&reader, &element);
                match current.as_mut() {
                    None => {
                        if name.is(Namespace::Word, "p") && at_body_level(&path) {
                            paragraphs.push(String::new());
                        }
                    }
                    Some((text, depth)) if in_run(&path[*depth + 1..]) => {
                        if let Some(special) = run_content(&reader, &element, &name)? {
                            text.push(special);
                        }
                    }
                    Some(_) => {}
                }
            }
            Event::Text(content) => {
                if let Some((text, depth)) = current.as_mut() {
                    let relative = &path[*depth + 1..];
                    if let Some((last, parents)) = relative.split_last() {
                        if last.is(Namespace::Word, "t") && in_run(parents) {
                            text.push_str(&content.unescape()?);
                        }
                    }
                }
            }
            Event::End(_) => {
                path.pop();
                let closes_paragraph =
                    matches!(&current, Some((_, depth)) if path.len() == *depth);
                if closes_paragraph {
                    if let Some((text, _)) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Character produced by an empty run element such as a tab or a line break.
fn run_content(
    reader: &NsReader<&[u8]>,
    element: &BytesStart<'_>,
    name: &ElementName,
) -> Result<Option<char>, quick_xml::Error> {
    let content = if name.is(Namespace::Word, "tab") || name.is(Namespace::Word, "ptab") {
        Some('\t')
    } else if name.is(Namespace::Word, "cr") {
        Some('\n')
    } else if name.is(Namespace::Word, "noBreakHyphen") {
        Some('-')
    } else if name.is(Namespace::Word, "br") {
        // Page and column breaks carry no text.
        let kind = namespaced_attribute(reader, element, Namespace::Word, "type")?;
        matches!(kind.as_deref(), None | Some("textWrapping")).then_some('\n')
    } else {
        None
    };
    Ok(content)
}

fn at_body_level(path: &[ElementName]) -> bool {
    matches!(path, [_, body] if body.is(Namespace::Word, "body"))
}

/// Whether `relative` (path below the paragraph) is a run, directly or through a hyperlink.
fn in_run(relative: &[ElementName]) -> bool {
    match relative {
        [run] => run.is(Namespace::Word, "r"),
        [link, run] => link.is(Namespace::Word, "hyperlink") && run.is(Namespace::Word, "r"),
        _ => false,
    }
}
