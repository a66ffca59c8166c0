// Similarity engine: extraction, validation and pairwise scoring for a batch.
//
// A batch is all-or-nothing: the first file that fails to extract, or that
// extracts to nothing but whitespace, aborts the computation and no matrix
// is produced.

pub mod matcher;
pub mod matrix;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{DetectError, Result};
use crate::extract::Document;
pub use matcher::MatcherOptions;
pub use matrix::SimilarityMatrix;

/// The matrix together with the display names of its rows/columns.
///
/// Serializes to `{"matrix": [[...]], "files": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimilarityReport {
    pub matrix: SimilarityMatrix,
    pub files: Vec<String>,
}

/// A pair of distinct documents whose score reached the flag threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedPair {
    pub left: String,
    pub right: String,
    pub score: f64,
}

impl SimilarityReport {
    /// Pairs `i < j` scoring at or above `threshold`, highest score first.
    pub fn flagged_pairs(&self, threshold: f64) -> Vec<FlaggedPair> {
        let mut indexed: Vec<(usize, usize, f64)> = Vec::new();
        for (i, row) in self.matrix.rows().iter().enumerate() {
            for (j, &score) in row.iter().enumerate().skip(i + 1) {
                if score >= threshold {
                    indexed.push((i, j, score));
                }
            }
        }
        // Stable sort keeps input order among equal scores
        indexed.sort_by(|a, b| b.2.total_cmp(&a.2));

        indexed
            .into_iter()
            .map(|(i, j, score)| FlaggedPair {
                left: self.files[i].clone(),
                right: self.files[j].clone(),
                score,
            })
            .collect()
    }
}

/// Computes similarity reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine {
    pub options: MatcherOptions,
}

impl SimilarityEngine {
    pub fn new(options: MatcherOptions) -> Self {
        Self { options }
    }

    /// Extract every file in order and score all pairs.
    pub fn compute<P: AsRef<Path>>(&self, paths: &[P]) -> Result<SimilarityReport> {
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let document = Document::load(path.as_ref())?;
            ensure_content(&document)?;
            debug!(
                file = %document.display_name(),
                chars = document.text.chars().count(),
                "Extracted document"
            );
            documents.push(document);
        }

        self.score_documents(&documents)
    }

    /// Validate already-extracted documents and score all pairs.
    pub fn score_documents(&self, documents: &[Document]) -> Result<SimilarityReport> {
        for document in documents {
            ensure_content(document)?;
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let matrix = SimilarityMatrix::compute(&texts, self.options);
        let files = documents.iter().map(Document::display_name).collect();

        info!(
            documents = documents.len(),
            pairs = documents.len() * (documents.len() + 1) / 2,
            "Similarity matrix computed"
        );

        Ok(SimilarityReport { matrix, files })
    }
}

fn ensure_content(document: &Document) -> Result<()> {
    if document.is_blank() {
        return Err(DetectError::EmptyContent(document.path.clone()));
    }
    Ok(())
}

/// Score a batch of files with the default matcher options.
pub fn compute_similarity<P: AsRef<Path>>(paths: &[P]) -> Result<SimilarityReport> {
    SimilarityEngine::default().compute(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, text: &str) -> Document {
        Document::new(name, text)
    }

    #[test]
    fn blank_document_aborts_batch() {
        let docs = vec![doc("a.txt", "real text"), doc("b.txt", "  \n "), doc("c.txt", "more")];
        let err = SimilarityEngine::default().score_documents(&docs).unwrap_err();
        assert!(matches!(err, DetectError::EmptyContent(ref p) if p == Path::new("b.txt")));
    }

    #[test]
    fn files_follow_input_order() {
        let docs = vec![doc("dir/z.txt", "zzz"), doc("a.pdf", "aaa"), doc("m.docx", "mmm")];
        let report = SimilarityEngine::default().score_documents(&docs).unwrap();
        assert_eq!(report.files, vec!["z.txt", "a.pdf", "m.docx"]);
        assert_eq!(report.matrix.len(), 3);
    }

    #[test]
    fn flagged_pairs_sorted_and_thresholded() {
        let report = SimilarityReport {
            matrix: SimilarityMatrix::from_rows(vec![
                vec![100.0, 85.0, 10.0],
                vec![85.0, 100.0, 92.5],
                vec![10.0, 92.5, 100.0],
            ]),
            files: vec!["a".into(), "b".into(), "c".into()],
        };

        let flagged = report.flagged_pairs(80.0);
        assert_eq!(
            flagged,
            vec![
                FlaggedPair { left: "b".into(), right: "c".into(), score: 92.5 },
                FlaggedPair { left: "a".into(), right: "b".into(), score: 85.0 },
            ]
        );
        assert!(report.flagged_pairs(95.0).is_empty());
    }

    #[test]
    fn report_json_shape() {
        let docs = vec![doc("a.txt", "hello world"), doc("b.txt", "hello world")];
        let report = SimilarityEngine::default().score_documents(&docs).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "matrix": [[100.0, 100.0], [100.0, 100.0]],
                "files": ["a.txt", "b.txt"],
            })
        );
    }
}
