// Output formatting: terminal display of similarity reports.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Works on characters, not bytes, so multi-byte filenames never split mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_untouched() {
        assert_eq!(truncate_chars("a.txt", 10), "a.txt");
    }

    #[test]
    fn respects_char_boundaries() {
        assert_eq!(truncate_chars("résumé_final.docx", 6), "résumé...");
    }
}
