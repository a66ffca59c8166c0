// PDF extraction via lopdf.
//
// Pages are read one at a time, in page order, and their text concatenated.
// A page that yields no extractable text (scanned images, unsupported font
// encodings, broken content streams) contributes an empty string; only a
// document that cannot be loaded at all is an error.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::traits::TextExtractor;
use crate::error::{DetectError, Result};

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| DetectError::io(path, e))?;
        let document = Document::load_mem(&bytes)
            .map_err(|e| DetectError::parse(path, format!("lopdf: {e}")))?;

        Ok(extract_pages(&document, path))
    }
}

/// Concatenate the text of every page, substituting "" for pages that fail.
pub(crate) fn extract_pages(document: &Document, path: &Path) -> String {
    let pages = document.get_pages();
    let mut text = String::new();

    // get_pages is keyed by 1-based page number, so iteration is page order
    for &page_number in pages.keys() {
        match document.extract_text(&[page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    page = page_number,
                    error = %e,
                    "Page text not extractable, treating as empty"
                );
            }
        }
    }

    debug!(path = %path.display(), pages = pages.len(), chars = text.len(), "Extracted pdf");
    text
}
