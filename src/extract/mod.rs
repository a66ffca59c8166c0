// Content extraction: turns uploaded files into plain text.
//
// Dispatch is by file extension only. There is no content sniffing, so a
// mislabeled file is read with the wrong extractor rather than rejected.

pub mod docx;
pub mod pdf;
pub mod plain;
pub mod traits;

use std::path::{Path, PathBuf};

use crate::error::{DetectError, Result};
use traits::TextExtractor;

/// The closed set of formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    PlainText,
    Word,
    Pdf,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [Self::PlainText, Self::Word, Self::Pdf];

    /// Lowercase extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Word => "docx",
            Self::Pdf => "pdf",
        }
    }

    /// Match an extension (case-insensitive, with or without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    /// Determine the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| DetectError::UnsupportedFormat(path.to_path_buf()))
    }

    fn extractor(self) -> &'static dyn TextExtractor {
        match self {
            Self::PlainText => &plain::PlainTextExtractor,
            Self::Word => &docx::DocxExtractor,
            Self::Pdf => &pdf::PdfExtractor,
        }
    }

    /// Extract the text of `path` using this format's extractor.
    pub fn extract(self, path: &Path) -> Result<String> {
        self.extractor().extract(path)
    }
}

/// Extract the text of a file, choosing the extractor from its extension.
pub fn extract_text(path: &Path) -> Result<String> {
    DocumentFormat::from_path(path)?.extract(path)
}

/// A file and its extracted text.
///
/// Lives only for the duration of one similarity computation.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read and extract a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = extract_text(path)?;
        Ok(Self::new(path, text))
    }

    /// Final path component, extension included. Falls back to the whole
    /// path for inputs like `..` that have no file name.
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }

    /// True when the text contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Base name of `path` as shown in matrix headers and exports.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_dispatch_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("essay.TXT")).unwrap(),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("dir/cv.Docx")).unwrap(),
            DocumentFormat::Word
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("scan.pdf")).unwrap(),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn unknown_or_missing_extension_is_unsupported() {
        for name in ["table.csv", "README", "archive.tar.gz", "notes.doc"] {
            let err = DocumentFormat::from_path(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, DetectError::UnsupportedFormat(ref p) if p == Path::new(name)),
                "{name} should be unsupported, got {err:?}"
            );
        }
    }

    #[test]
    fn from_extension_accepts_leading_dot() {
        assert_eq!(DocumentFormat::from_extension(".pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("rtf"), None);
    }

    #[test]
    fn display_name_is_base_name() {
        let doc = Document::new("uploads/batch/cover letter.docx", "x");
        assert_eq!(doc.display_name(), "cover letter.docx");
    }

    #[test]
    fn blank_detection() {
        assert!(Document::new("a.txt", " \n\t ").is_blank());
        assert!(Document::new("a.txt", "").is_blank());
        assert!(!Document::new("a.txt", " x ").is_blank());
    }
}
