use quick_xml::{NsReader, events::Event};
use rustc_hash::FxHashMap;

use super::ooxml::{
    ElementName, Namespace, Package, attribute, namespaced_attribute, resolve_element,
};
use super::types::{DocumentFormat, ExtractionError};

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// Extract the text of every text-bearing shape, slide by slide, joined by newlines.
///
/// Shapes are visited in their stored order within each slide. Pictures, tables, connectors
/// and group shapes are skipped.
pub fn extract_pptx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut package = Package::open(bytes, DocumentFormat::Pptx)?;
    let xml_error = |e: quick_xml::Error| ExtractionError::parser(DocumentFormat::Pptx, e);

    let relationships = relationship_targets(&package.read_part(PRESENTATION_RELS_PART)?)
        .map_err(xml_error)?;
    let slide_ids = slide_relationship_ids(&package.read_part(PRESENTATION_PART)?)
        .map_err(xml_error)?;

    let mut fragments = Vec::new();
    for id in &slide_ids {
        let target = relationships.get(id).ok_or_else(|| {
            ExtractionError::parser(
                DocumentFormat::Pptx,
                format!("slide relationship '{id}' not found"),
            )
        })?;
        let slide = package.read_part(&resolve_target(target))?;
        fragments.extend(shape_texts(&slide).map_err(xml_error)?);
    }

    tracing::debug!(
        slides = slide_ids.len(),
        shapes = fragments.len(),
        "Extracted PPTX text"
    );
    Ok(fragments.join("\n").trim().to_string())
}

/// Map relationship ids to their targets.
fn relationship_targets(xml: &str) -> Result<FxHashMap<String, String>, quick_xml::Error> {
    let mut reader = NsReader::from_str(xml);
    let mut targets = FxHashMap::default();
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                let name = resolve_element(&reader, &element);
                if !name.is(Namespace::PackageRelationships, "Relationship") {
                    continue;
                }
                if let (Some(id), Some(target)) = (
                    attribute(&element, b"Id")?,
                    attribute(&element, b"Target")?,
                ) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(targets)
}

/// Relationship ids of the slides listed in `p:sldIdLst`, in presentation order.
fn slide_relationship_ids(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = NsReader::from_str(xml);
    let mut ids = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                if !resolve_element(&reader, &element).is(Namespace::Presentation, "sldId") {
                    continue;
                }
                let id = namespaced_attribute(&reader, &element, Namespace::Relationships, "id")?;
                ids.extend(id);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(ids)
}

/// Turn a target relative to `ppt/` (or absolute within the package) into a part name.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{target}"),
    }
}

/// Text of each `p:sp` shape directly under the slide's shape tree.
fn shape_texts(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = NsReader::from_str(xml);
    let mut path: Vec<ElementName> = Vec::new();
    let mut texts = Vec::new();
    let mut shape: Option<ShapeText> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = resolve_element(&reader, &element);
                match shape.as_mut() {
                    None if is_shape(&name) && at_shape_level(&path) => {
                        shape = Some(ShapeText::new(path.len()));
                    }
                    Some(current) if is_paragraph(&name) && current.is_paragraph_parent(&path) => {
                        current.paragraphs.push(String::new());
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::Empty(element) => {
                let name = resolve_element(&reader, &element);
                match shape.as_mut() {
                    None => {
                        if is_shape(&name) && at_shape_level(&path) {
                            texts.push(String::new());
                        }
                    }
                    Some(current) if is_paragraph(&name) && current.is_paragraph_parent(&path) => {
                        current.paragraphs.push(String::new());
                    }
                    Some(current) if name.is(Namespace::Drawing, "br") => current.push_str("\n"),
                    Some(_) => {}
                }
            }
            Event::Text(content) => {
                if let Some(current) = shape.as_mut() {
                    if path.last().is_some_and(|name| name.is(Namespace::Drawing, "t")) {
                        current.push_str(&content.unescape()?);
                    }
                }
            }
            Event::End(_) => {
                path.pop();
                let closes_shape =
                    matches!(&shape, Some(current) if path.len() == current.depth);
                if closes_shape {
                    if let Some(finished) = shape.take() {
                        texts.push(finished.paragraphs.join("\n"));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(texts)
}

fn is_shape(name: &ElementName) -> bool {
    name.is(Namespace::Presentation, "sp")
}

fn is_paragraph(name: &ElementName) -> bool {
    name.is(Namespace::Drawing, "p")
}

fn at_shape_level(path: &[ElementName]) -> bool {
    path.len() == 3 && path[2].is(Namespace::Presentation, "spTree")
}

struct ShapeText {
    /// Index of the `p:sp` element in the element path.
    depth: usize,
    paragraphs: Vec<String>,
}

impl ShapeText {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            paragraphs: Vec::new(),
        }
    }

    /// Whether the element at the end of `path` is this shape's text body.
    fn is_paragraph_parent(&self, path: &[ElementName]) -> bool {
        path.len() == self.depth + 2
            && path
                .last()
                .is_some_and(|name| name.is(Namespace::Presentation, "txBody"))
    }

    fn push_str(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ooxml::build_package;

    const PRESENTATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId2"/></p:sldIdLst></p:presentation>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/></Relationships>"#;

    fn slide(shapes: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>{shapes}</p:spTree></p:cSld></p:sld>"#
        )
    }

    fn text_shape(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|text| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{text}</a:t></a:r></a:p>"))
            .collect();
        format!("<p:sp><p:nvSpPr/><p:spPr/><p:txBody><a:bodyPr/>{body}</p:txBody></p:sp>")
    }

    fn pptx(first: &str, second: &str) -> Vec<u8> {
        let first = slide(first);
        let second = slide(second);
        build_package(&[
            (PRESENTATION_PART, PRESENTATION),
            (PRESENTATION_RELS_PART, RELS),
            ("ppt/slides/slide1.xml", first.as_str()),
            ("ppt/slides/slide2.xml", second.as_str()),
        ])
    }

    #[test]
    fn follows_presentation_slide_order() {
        let first = format!("{}{}", text_shape(&["Title slide"]), text_shape(&["Subtitle"]));
        let second = text_shape(&["Bullet one", "Bullet two"]);
        let bytes = pptx(&first, &second);

        let text = extract_pptx(&bytes).expect("pptx text");
        assert_eq!(text, "Title slide\nSubtitle\nBullet one\nBullet two");
    }

    #[test]
    fn skips_pictures_and_groups() {
        let first = format!(
            "{}<p:pic><p:nvPicPr/><p:blipFill/></p:pic><p:grpSp>{}</p:grpSp>{}",
            text_shape(&["Before picture"]),
            text_shape(&["Grouped"]),
            text_shape(&["After picture"]),
        );
        let bytes = pptx(&first, "");

        let text = extract_pptx(&bytes).expect("pptx text");
        assert_eq!(text, "Before picture\nAfter picture");
    }

    #[test]
    fn shapes_without_text_contribute_empty_fragments() {
        let first = format!(
            "{}<p:sp><p:nvSpPr/><p:spPr/></p:sp>{}",
            text_shape(&["Top"]),
            text_shape(&["Bottom"]),
        );
        let bytes = pptx(&first, "");

        let text = extract_pptx(&bytes).expect("pptx text");
        assert_eq!(text, "Top\n\nBottom");
    }

    #[test]
    fn alternate_prefixes_for_presentation_namespaces_are_read() {
        let presentation = concat!(
            r#"<pres:presentation xmlns:pres="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
            r#"xmlns:rel="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<pres:sldIdLst><pres:sldId id="256" rel:id="rId3"/></pres:sldIdLst>"#,
            "</pres:presentation>",
        );
        let slide = concat!(
            r#"<sld xmlns="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
            r#"xmlns:draw="http://schemas.openxmlformats.org/drawingml/2006/main">"#,
            "<cSld><spTree><sp><txBody><draw:bodyPr/>",
            "<draw:p><draw:r><draw:t>Renamed</draw:t></draw:r><draw:br/>",
            "<draw:r><draw:t>prefixes</draw:t></draw:r></draw:p>",
            "</txBody></sp></spTree></cSld></sld>",
        );
        let bytes = build_package(&[
            (PRESENTATION_PART, presentation),
            (PRESENTATION_RELS_PART, RELS),
            ("ppt/slides/slide1.xml", slide),
        ]);

        let text = extract_pptx(&bytes).expect("pptx text");
        assert_eq!(text, "Renamed\nprefixes");
    }

    #[test]
    fn resolves_relative_and_absolute_targets() {
        assert_eq!(resolve_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("/ppt/slides/slide9.xml"), "ppt/slides/slide9.xml");
    }

    #[test]
    fn docx_bytes_are_rejected() {
        let bytes = build_package(&[("word/document.xml", "<w:document/>")]);
        let error = extract_pptx(&bytes).expect_err("not a presentation");
        assert!(error.to_string().starts_with("Error extracting text from PPTX: "));
    }
}
