// Error types for the extraction and similarity core.
//
// Every variant is fatal to the batch being processed. The messages for
// UnsupportedFormat and EmptyContent are shown to end users verbatim.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the extraction and similarity modules.
pub type Result<T, E = DetectError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum DetectError {
    /// The file extension is not one of .txt, .docx or .pdf
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The file extracted to nothing but whitespace
    #[error("Empty or unreadable content in file: {}", .0.display())]
    EmptyContent(PathBuf),

    /// The file could not be read from disk
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its container format could not be parsed
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl DetectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The file this error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::UnsupportedFormat(path) | Self::EmptyContent(path) => path,
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }

    /// The same error reported against a different path, e.g. the name a
    /// file was uploaded under rather than where it was staged.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match self {
            Self::UnsupportedFormat(_) => Self::UnsupportedFormat(path),
            Self::EmptyContent(_) => Self::EmptyContent(path),
            Self::Io { source, .. } => Self::Io { path, source },
            Self::Parse { message, .. } => Self::Parse { path, message },
        }
    }
}
