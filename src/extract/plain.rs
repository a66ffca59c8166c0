// Plain text extraction.
//
// Uploaded .txt files come from anywhere, so the bytes are decoded as UTF-8
// with invalid sequences dropped rather than rejected. Line endings are
// normalized to '\n'.

use std::path::Path;

use super::traits::TextExtractor;
use crate::error::{DetectError, Result};

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| DetectError::io(path, e))?;
        Ok(decode_lossy(&bytes))
    }
}

/// Decode UTF-8, skipping undecodable byte sequences, and translate
/// `\r\n` / `\r` line endings to `\n`.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut decoded = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        decoded.push_str(chunk.valid());
    }

    if !decoded.contains('\r') {
        return decoded;
    }
    decoded.replace("\r\n", "\n").replace('\r', "\n")
}
