//! Core editor types: positions, ranges, line edits, and batch tracking.
//!
//! Positions are 1-based lines and columns. Columns count Unicode scalar
//! values (chars), not bytes or UTF-16 code units.

use std::fmt;

use smol_str::SmolStr;

/// A line/column position in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, in chars.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position reached after inserting `text` at this position.
    pub fn advance(self, text: &str) -> Self {
        match text.rfind('\n') {
            Some(last_newline) => Self {
                line: self.line + text.matches('\n').count(),
                column: text[last_newline + 1..].chars().count() + 1,
            },
            None => Self {
                line: self.line,
                column: self.column + text.chars().count(),
            },
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A line/column range, used both for selections and for edit targets.
///
/// The user's selection may come in either direction; use [`TextRange::normalize`]
/// before reading `start_*`/`end_*` as ordered bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl TextRange {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// A zero-width range (caret).
    pub fn caret(line: usize, column: usize) -> Self {
        Self::new(line, column, line, column)
    }

    /// Build an ordered range from two positions in any order.
    pub fn between(a: Position, b: Position) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self::new(start.line, start.column, end.line, end.column)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }

    /// Check if the range is empty (caret only).
    pub fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }

    /// Normalize the range so start <= end.
    pub fn normalize(self) -> Self {
        Self::between(self.start(), self.end())
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start(), self.end())
    }
}

/// A single replacement applied as part of an edit batch.
///
/// Prefix toggles always produce full-line replacements (see
/// [`create_line_edit`](crate::edit::create_line_edit)); wrap and link commands
/// target the selection itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineEdit {
    pub range: TextRange,
    pub text: String,
    /// Carets sitting exactly at an insertion point move past the inserted text.
    pub force_move_markers: bool,
}

impl LineEdit {
    pub fn new(range: TextRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            force_move_markers: true,
        }
    }
}

/// Information about the most recently applied edit batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchInfo {
    /// Identifier the command supplied for the batch (e.g. `"markdown-toolbar"`).
    pub source: SmolStr,
    /// Number of edits in the batch.
    pub edit_count: usize,
    /// Total chars inserted across the batch.
    pub inserted_len: usize,
    /// Total chars removed across the batch.
    pub deleted_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_normalize() {
        let backwards = TextRange::new(3, 5, 1, 2);
        let range = backwards.normalize();
        assert_eq!(range.start(), Position::new(1, 2));
        assert_eq!(range.end(), Position::new(3, 5));
        assert!(!range.is_single_line());

        // Same line, columns reversed.
        let range = TextRange::new(2, 9, 2, 4).normalize();
        assert_eq!(range, TextRange::new(2, 4, 2, 9));
    }

    #[test]
    fn test_caret() {
        let caret = TextRange::caret(4, 7);
        assert!(caret.is_empty());
        assert!(caret.is_single_line());
        assert_eq!(caret.to_string(), "4:7-4:7");
    }

    #[test]
    fn test_position_advance() {
        let pos = Position::new(2, 3);
        assert_eq!(pos.advance(""), pos);
        assert_eq!(pos.advance("**"), Position::new(2, 5));
        assert_eq!(pos.advance("héllo"), Position::new(2, 8));
        assert_eq!(pos.advance("ab\ncd\nxyz"), Position::new(4, 4));
        assert_eq!(pos.advance("ab\n"), Position::new(3, 1));
    }
}
