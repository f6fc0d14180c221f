use std::io::{Cursor, Write};
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use docsum::{
    api::create_router,
    config::Config,
    extraction::{self, DocumentFormat},
    processing::SummaryService,
};
use lopdf::{
    Document, Object, Stream,
    content::{Content, Operation},
    dictionary,
};
use tower::ServiceExt;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

const BOUNDARY: &str = "docsum-integration-boundary";
const PETS: &str = "Cats are great. Dogs are great too. Birds can fly.";
const PETS_SUMMARY: &str = "Dogs are great too. Cats are great. Birds can fly.";

fn app() -> Router {
    create_router(
        Arc::new(SummaryService::with_sentence_count(3)),
        &Config::default(),
    )
}

fn upload(path: &str, filename: &str, contents: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app().oneshot(request).await.expect("router response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&body).expect("json body"))
}

fn package(parts: &[(&str, String)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in parts {
        writer.start_file(*name, options).expect("start part");
        writer.write_all(contents.as_bytes()).expect("write part");
    }
    writer.finish().expect("finish package").into_inner()
}

fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"))
        .collect();
    package(&[(
        "word/document.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        ),
    )])
}

fn pptx(slides: &[&[&str]]) -> Vec<u8> {
    let mut ids = String::new();
    let mut rels = String::new();
    let mut parts = Vec::new();
    for (index, shapes) in slides.iter().enumerate() {
        let number = index + 1;
        ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{number}"/>"#, 255 + number));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{number}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{number}.xml"/>"#
        ));
        let shapes: String = shapes
            .iter()
            .map(|text| {
                format!(
                    "<p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:t>{text}</a:t></a:r></a:p>\
                     </p:txBody></p:sp>"
                )
            })
            .collect();
        parts.push((
            format!("ppt/slides/slide{number}.xml"),
            format!(
                r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>{shapes}</p:spTree></p:cSld></p:sld>"#
            ),
        ));
    }

    let mut all = vec![
        (
            "ppt/presentation.xml".to_string(),
            format!(
                r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst>{ids}</p:sldIdLst></p:presentation>"#
            ),
        ),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            format!(
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
            ),
        ),
    ];
    all.extend(parts);
    let borrowed: Vec<(&str, String)> = all
        .iter()
        .map(|(name, xml)| (name.as_str(), xml.clone()))
        .collect();
    package(&borrowed)
}

fn pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

#[tokio::test]
async fn txt_upload_produces_reference_summary() {
    let (status, json) = send(upload("/summarize/", "pets.txt", PETS.as_bytes())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"], PETS_SUMMARY);
    assert_eq!(json["filename"], "pets.txt");
}

#[tokio::test]
async fn docx_upload_summarizes_body_paragraphs() {
    let bytes = docx(&["Cats are great.", "Dogs are great too.", "Birds can fly."]);
    let (status, json) = send(upload("/summarize/", "pets.docx", &bytes)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"], PETS_SUMMARY);
    assert_eq!(json["filename"], "pets.docx");
}

#[tokio::test]
async fn pptx_upload_summarizes_slide_text() {
    let bytes = pptx(&[&["Cats are great.", "Dogs are great too."], &["Birds can fly."]]);
    let (status, json) = send(upload("/upload", "pets.pptx", &bytes)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"], PETS_SUMMARY);
}

#[test]
fn pdf_pages_are_extracted_in_order() {
    let bytes = pdf(&["First page text.", "Second page text."]);
    let text = extraction::extract(DocumentFormat::Pdf, &bytes).expect("pdf text");

    let first = text.find("First page text.").expect("first page present");
    let second = text.find("Second page text.").expect("second page present");
    assert!(first < second);
    assert_eq!(text, text.trim());
}

#[test]
fn extraction_is_deterministic_for_every_format() {
    let samples = [
        (DocumentFormat::Pdf, pdf(&["Same text."])),
        (DocumentFormat::Docx, docx(&["Same text."])),
        (DocumentFormat::Pptx, pptx(&[&["Same text."]])),
        (DocumentFormat::Txt, b"Same text.".to_vec()),
    ];
    for (format, bytes) in samples {
        let copy = bytes.clone();
        let first = extraction::extract(format, &bytes).expect("first extraction");
        let second = extraction::extract(format, &copy).expect("second extraction");
        assert_eq!(first, second, "{format}");
    }
}

#[tokio::test]
async fn blank_document_reports_no_content() {
    let bytes = docx(&["", "   "]);
    let (status, json) = send(upload("/summarize/", "blank.docx", &bytes)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"], "No content found in the document.");
    assert!(json.get("filename").is_none());
}

#[tokio::test]
async fn csv_and_uppercase_pdf_are_unsupported() {
    for name in ["report.csv", "paper.PDF"] {
        let (status, json) = send(upload("/summarize/", name, b"a,b,c")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{name}");
        assert_eq!(
            json["detail"],
            "Unsupported file format. Supported: PDF, DOCX, PPTX, TXT"
        );
    }
}

#[tokio::test]
async fn corrupt_docx_reports_extraction_error() {
    let (status, json) = send(upload("/summarize/", "broken.docx", b"not a zip archive")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = json["detail"].as_str().expect("detail message");
    assert!(detail.starts_with("Error extracting text from DOCX: "), "{detail}");
}

#[tokio::test]
async fn invalid_utf8_text_is_a_generic_failure() {
    let (status, json) = send(upload("/summarize/", "notes.txt", &[0xff, 0xfe, 0x41])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json.get("detail").is_none());
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn summary_never_exceeds_three_sentences() {
    let text = "Rust is fast. Rust is safe. Rust is fun. \
                Tea is hot. Rust compiles Rust. Coffee is hot.";
    let (_, json) = send(upload("/summarize/", "rust.txt", text.as_bytes())).await;

    let summary = json["summary"].as_str().expect("summary");
    assert_eq!(summary.matches('.').count(), 3);
    assert!(summary.starts_with("Rust compiles Rust."));
}
