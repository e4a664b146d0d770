//! String helpers for working with line text in char columns.

use std::borrow::Cow;

/// Byte offset of the char at `char_idx` in `text`. `char_idx` equal to the
/// char count maps to `text.len()`.
pub fn byte_offset(text: &str, char_idx: usize) -> Option<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .nth(char_idx)
}

/// Slice `text` by char indices.
pub fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let from = byte_offset(text, start)?;
    let to = byte_offset(text, end)?;
    Some(&text[from..to])
}

/// Replace any leading whitespace with a single space.
pub fn collapse_leading_whitespace(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim_start();
    if trimmed.len() == text.len() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!(" {trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset() {
        let text = "aé🌍b";
        assert_eq!(byte_offset(text, 0), Some(0));
        assert_eq!(byte_offset(text, 2), Some(3));
        assert_eq!(byte_offset(text, 3), Some(7));
        assert_eq!(byte_offset(text, 4), Some(8));
        assert_eq!(byte_offset(text, 5), None);
    }

    #[test]
    fn test_char_slice() {
        let text = "x **wörd** y";
        assert_eq!(char_slice(text, 2, 4), Some("**"));
        assert_eq!(char_slice(text, 4, 8), Some("wörd"));
        assert_eq!(char_slice(text, 10, 13), None);
        assert_eq!(char_slice(text, 4, 2), None);
        assert_eq!(char_slice(text, 12, 12), Some(""));
    }

    #[test]
    fn test_collapse_leading_whitespace() {
        assert_eq!(collapse_leading_whitespace("text"), "text");
        assert_eq!(collapse_leading_whitespace("   text"), " text");
        assert_eq!(collapse_leading_whitespace("\t text"), " text");
        assert_eq!(collapse_leading_whitespace(""), "");
    }
}
