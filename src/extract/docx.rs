// Word (.docx) extraction via docx-rs.
//
// A .docx file is a ZIP archive of XML parts. docx-rs parses it into a typed
// tree:
//
//   Document.children -> Paragraph.children -> Run.children -> Text
//
// Only top-level body paragraphs are read, in document order, one line per
// paragraph. Empty paragraphs still produce an (empty) line so the line
// structure of the document survives. Tables, section properties and other
// body elements are skipped.

use std::path::Path;

use docx_rs::{DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};

use super::traits::TextExtractor;
use crate::error::{DetectError, Result};

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| DetectError::io(path, e))?;
        let docx = docx_rs::read_docx(&bytes)
            .map_err(|e| DetectError::parse(path, format!("docx-rs: {e:?}")))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        tracing::debug!(
            path = %path.display(),
            paragraphs = paragraphs.len(),
            "Extracted docx paragraphs"
        );

        Ok(paragraphs.join("\n"))
    }
}

/// Concatenate the text of every run in a paragraph.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        append_paragraph_child(child, &mut buffer);
    }
    buffer
}

fn append_paragraph_child(child: &ParagraphChild, buffer: &mut String) {
    match child {
        ParagraphChild::Run(run) => append_run(run, buffer),
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                append_paragraph_child(inner, buffer);
            }
        }
        // Tracked insertions are part of the visible text; deletions are not.
        ParagraphChild::Insert(insert) => {
            for inner in &insert.children {
                if let InsertChild::Run(run) = inner {
                    append_run(run, buffer);
                }
            }
        }
        _ => {}
    }
}

fn append_run(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Tab(_) => buffer.push('\t'),
            RunChild::Break(_) => buffer.push('\n'),
            _ => {}
        }
    }
}
