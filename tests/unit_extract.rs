// Unit tests for content extraction.
//
// Each format is exercised against fixtures written to a temp directory:
// plain text decoding rules, docx paragraph joining, PDF page handling, and
// the extension-only dispatch contract.

mod common;

use std::path::Path;

use dupdetect::error::DetectError;
use dupdetect::extract::{extract_text, Document, DocumentFormat};

use common::{write_bytes, write_docx, write_pdf, write_txt};

// ============================================================
// Plain text
// ============================================================

#[test]
fn txt_reads_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_txt(dir.path(), "essay.txt", "line one\nline two\n");
    assert_eq!(extract_text(&path).unwrap(), "line one\nline two\n");
}

#[test]
fn txt_drops_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bytes(dir.path(), "mixed.txt", b"caf\xe9 au lait");
    assert_eq!(extract_text(&path).unwrap(), "caf au lait");
}

#[test]
fn txt_normalizes_windows_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bytes(dir.path(), "crlf.txt", b"first\r\nsecond\r\n");
    assert_eq!(extract_text(&path).unwrap(), "first\nsecond\n");
}

#[test]
fn uppercase_extension_dispatches() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_txt(dir.path(), "LOUD.TXT", "still text");
    assert_eq!(extract_text(&path).unwrap(), "still text");
}

// ============================================================
// Word documents
// ============================================================

#[test]
fn docx_paragraphs_joined_by_newlines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(
        dir.path(),
        "letter.docx",
        &["Dear committee,", "I am applying for the role.", "Regards"],
    );
    assert_eq!(
        extract_text(&path).unwrap(),
        "Dear committee,\nI am applying for the role.\nRegards"
    );
}

#[test]
fn docx_empty_paragraphs_keep_their_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "spaced.docx", &["Intro", "", "Body"]);
    assert_eq!(extract_text(&path).unwrap(), "Intro\n\nBody");
}

#[test]
fn docx_that_is_not_a_zip_fails_to_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_txt(dir.path(), "fake.docx", "just some text");
    let err = extract_text(&path).unwrap_err();
    assert!(matches!(err, DetectError::Parse { .. }), "got {err:?}");
}

// ============================================================
// PDF documents
// ============================================================

#[test]
fn pdf_pages_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "report.pdf", &["First page text", "Second page text"]);
    let text = extract_text(&path).unwrap();

    let first = text.find("First page text").expect("first page missing");
    let second = text.find("Second page text").expect("second page missing");
    assert!(first < second, "pages out of order: {text:?}");
}

#[test]
fn pdf_page_without_text_contributes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "scan.pdf", &["Alpha", "", "Omega"]);
    let text = extract_text(&path).unwrap();
    assert!(text.contains("Alpha"));
    assert!(text.contains("Omega"));
}

#[test]
fn pdf_with_only_image_pages_is_blank() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "images.pdf", &["", ""]);
    let doc = Document::load(&path).unwrap();
    assert!(doc.is_blank());
}

#[test]
fn corrupt_pdf_fails_to_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bytes(dir.path(), "broken.pdf", b"%PDF-1.4 this is not really a pdf");
    let err = extract_text(&path).unwrap_err();
    assert!(matches!(err, DetectError::Parse { .. }), "got {err:?}");
}

// ============================================================
// Dispatch contract
// ============================================================

#[test]
fn csv_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_txt(dir.path(), "grades.csv", "a,b,c");
    let err = extract_text(&path).unwrap_err();
    assert!(matches!(err, DetectError::UnsupportedFormat(ref p) if p == &path));
    assert!(err.to_string().starts_with("Unsupported file format:"));
}

#[test]
fn unsupported_extension_checked_before_reading() {
    // The file does not exist; the extension alone decides
    let err = extract_text(Path::new("/nonexistent/notes.rtf")).unwrap_err();
    assert!(matches!(err, DetectError::UnsupportedFormat(_)));
}

#[test]
fn mislabeled_file_is_read_with_the_labeled_format() {
    // PDF bytes with a .txt name come back as raw text, not an error
    let dir = tempfile::tempdir().unwrap();
    let bytes = common::pdf_bytes(&["hidden"]);
    let path = write_bytes(dir.path(), "actually_pdf.txt", &bytes);
    let text = extract_text(&path).unwrap();
    assert!(text.starts_with("%PDF-1.5"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = extract_text(Path::new("/nonexistent/dir/missing.txt")).unwrap_err();
    assert!(matches!(err, DetectError::Io { .. }), "got {err:?}");
}

#[test]
fn every_format_has_a_distinct_extension() {
    let exts: Vec<&str> = DocumentFormat::ALL.iter().map(|f| f.extension()).collect();
    assert_eq!(exts, vec!["txt", "docx", "pdf"]);
}
