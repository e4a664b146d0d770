//! Text buffer abstraction for document storage.
//!
//! The `TextBuffer` trait is what the toolbar commands ultimately edit. Line
//! access is part of the contract because every command works line by line.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

/// A text buffer that supports efficient editing and line lookups.
///
/// All offsets are in Unicode scalar values (chars), not bytes or UTF-16.
/// Line indices are 0-based here; the document layer converts to 1-based
/// line numbers.
pub trait TextBuffer {
    /// Total length in bytes (UTF-8).
    fn len_bytes(&self) -> usize;

    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Number of lines. An empty buffer has one (empty) line, and a trailing
    /// `\n` starts a new empty line.
    fn len_lines(&self) -> usize;

    /// Insert text at char offset.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Delete char range.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        if !char_range.is_empty() {
            self.delete(char_range.clone());
        }
        if !text.is_empty() {
            self.insert(char_range.start, text);
        }
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    /// Get character at offset. Returns None if out of bounds.
    fn char_at(&self, char_offset: usize) -> Option<char>;

    /// Text of the line at `line_idx`, without its `\n` or `\r\n` terminator.
    fn line(&self, line_idx: usize) -> Option<SmolStr>;

    /// Char offset where line `line_idx` starts.
    fn line_to_char(&self, line_idx: usize) -> Option<usize>;

    /// Index of the line containing `char_offset`. The end of the buffer
    /// belongs to the last line.
    fn char_to_line(&self, char_offset: usize) -> Option<usize>;

    /// Convert entire buffer to String.
    fn to_string(&self) -> String;
}

/// Ropey-backed text buffer.
///
/// Ropey is built without its CR/Unicode line-break features, so only `\n`
/// separates lines. A `\r` before the `\n` stays in the text and is trimmed
/// from the line content.
#[derive(Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    /// Create a new empty rope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from string.
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }
}

impl TextBuffer for EditorRope {
    fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.rope.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        self.rope.remove(char_range);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.start > char_range.end || char_range.end > self.len_chars() {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        if char_offset >= self.len_chars() {
            return None;
        }
        Some(self.rope.char(char_offset))
    }

    fn line(&self, line_idx: usize) -> Option<SmolStr> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_smolstr();
        let content = line.strip_suffix('\n').unwrap_or(line.as_str());
        let content = content.strip_suffix('\r').unwrap_or(content);
        Some(content.to_smolstr())
    }

    fn line_to_char(&self, line_idx: usize) -> Option<usize> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line_to_char(line_idx))
    }

    fn char_to_line(&self, char_offset: usize) -> Option<usize> {
        if char_offset > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.char_to_line(char_offset))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for EditorRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for EditorRope {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut rope = EditorRope::from_str("hello world");
        assert_eq!(rope.len_chars(), 11);
        assert_eq!(rope.to_string(), "hello world");

        rope.insert(5, " beautiful");
        assert_eq!(rope.to_string(), "hello beautiful world");

        // " beautiful" is 10 chars at positions 5..15
        rope.delete(5..15);
        assert_eq!(rope.to_string(), "hello world");
    }

    #[test]
    fn test_char_at() {
        let rope = EditorRope::from_str("hello");
        assert_eq!(rope.char_at(0), Some('h'));
        assert_eq!(rope.char_at(4), Some('o'));
        assert_eq!(rope.char_at(5), None);
    }

    #[test]
    fn test_slice() {
        let rope = EditorRope::from_str("hello world");
        assert_eq!(rope.slice(0..5).as_deref(), Some("hello"));
        assert_eq!(rope.slice(6..11).as_deref(), Some("world"));
        assert_eq!(rope.slice(0..100), None);
    }

    #[test]
    fn test_replace() {
        let mut rope = EditorRope::from_str("hello world");
        rope.replace(6..11, "rust");
        assert_eq!(rope.to_string(), "hello rust");

        // Pure insertion through replace.
        rope.replace(0..0, ">> ");
        assert_eq!(rope.to_string(), ">> hello rust");
    }

    #[test]
    fn test_lines() {
        let rope = EditorRope::from_str("# title\n\n- item\n");
        assert_eq!(rope.len_lines(), 4);
        assert_eq!(rope.line(0).as_deref(), Some("# title"));
        assert_eq!(rope.line(1).as_deref(), Some(""));
        assert_eq!(rope.line(2).as_deref(), Some("- item"));
        assert_eq!(rope.line(3).as_deref(), Some(""));
        assert_eq!(rope.line(4), None);

        assert_eq!(rope.line_to_char(2), Some(9));
        assert_eq!(rope.char_to_line(9), Some(2));
        assert_eq!(rope.char_to_line(rope.len_chars()), Some(3));
        assert_eq!(rope.char_to_line(100), None);
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let rope = EditorRope::new();
        assert!(rope.is_empty());
        assert_eq!(rope.len_lines(), 1);
        assert_eq!(rope.line(0).as_deref(), Some(""));
    }

    #[test]
    fn test_crlf_lines() {
        let rope = EditorRope::from_str("one\r\ntwo\r\nthree");
        assert_eq!(rope.len_lines(), 3);
        assert_eq!(rope.line(0).as_deref(), Some("one"));
        assert_eq!(rope.line(1).as_deref(), Some("two"));
        assert_eq!(rope.line(2).as_deref(), Some("three"));
        // The \r is still part of the text.
        assert_eq!(rope.line_to_char(1), Some(5));
    }

    #[test]
    fn test_multibyte_lines() {
        // "hello 🌍" - emoji is 4 bytes, 1 char
        let rope = EditorRope::from_str("hello 🌍\nnext");
        assert_eq!(rope.len_bytes(), 15);
        assert_eq!(rope.line_to_char(1), Some(8));
        assert_eq!(rope.line(0).map(|l| l.chars().count()), Some(7));
    }
}
