// Report exporters: spreadsheet and PDF renderings of a similarity report.
//
// Both renderers take the report as-is: filenames become the row and column
// headers, matrix entries become the cells. Output is returned as bytes so
// the CLI can write it to disk and the web layer can stream it without
// temporary files.

pub mod excel;
pub mod pdf;

use std::str::FromStr;

use anyhow::Result;

use crate::similarity::SimilarityReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    /// Suggested attachment name for downloads.
    pub fn download_name(self) -> String {
        format!("similarity_matrix.{}", self.file_extension())
    }

    pub fn render(self, report: &SimilarityReport) -> Result<Vec<u8>> {
        match self {
            Self::Excel => excel::render(report),
            Self::Pdf => pdf::render(report),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Ok(Self::Excel),
            "pdf" => Ok(Self::Pdf),
            other => anyhow::bail!("Invalid download type: {other}"),
        }
    }
}

/// Header row shared by the renderers: a corner label then every filename.
pub(crate) fn header_row(report: &SimilarityReport, corner: &str) -> Vec<String> {
    std::iter::once(corner.to_string())
        .chain(report.files.iter().cloned())
        .collect()
}
