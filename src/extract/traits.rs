// Text extractor trait: one implementation per supported file format.
//
// DocumentFormat picks the implementation from the file extension; the rest
// of the pipeline only ever sees the extracted string.

use std::path::Path;

use crate::error::Result;

/// Converts a file on disk into plain text.
pub trait TextExtractor {
    /// Read `path` and return its full text content.
    fn extract(&self, path: &Path) -> Result<String>;
}
