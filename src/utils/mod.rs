//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

/// Truncate text to at most `max_chars` characters
///
/// Counts Unicode scalar values rather than bytes, so multi-byte text is
/// never split inside a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_chars("very long text here", 9), "very long");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("привет мир", 6), "привет");
        assert_eq!(truncate_chars("🙂🙂🙂", 2), "🙂🙂");
    }
}
