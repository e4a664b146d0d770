//! Builders for whole-line replacement edits, and batch submission.

use smol_str::SmolStr;

use crate::document::EditorDocument;
use crate::types::{LineEdit, TextRange};

/// Range covering all of line `line_number`, whose content is `line_length`
/// chars long. The terminator is not included.
pub fn create_line_edit_range(line_number: usize, line_length: usize) -> TextRange {
    TextRange::new(line_number, 1, line_number, line_length + 1)
}

/// Edit replacing the whole of line `line_number` (currently `original_line`)
/// with `new_text`.
pub fn create_line_edit(line_number: usize, original_line: &str, new_text: impl Into<String>) -> LineEdit {
    LineEdit::new(
        create_line_edit_range(line_number, original_line.chars().count()),
        new_text,
    )
}

/// Lines covered by the current selection, with their 1-based numbers.
pub(crate) fn selected_lines<D: EditorDocument>(doc: &D) -> Option<Vec<(usize, SmolStr)>> {
    let selection = doc.selection()?.normalize();
    (selection.start_line..=selection.end_line)
        .map(|n| doc.line_content(n).map(|line| (n, line)))
        .collect()
}

/// Apply `edits` as one batch and return focus to the editor.
///
/// Rejected batches are logged and reported as not handled.
pub(crate) fn commit<D: EditorDocument>(doc: &mut D, source: &str, edits: &[LineEdit]) -> bool {
    match doc.apply_edits(source, edits) {
        Ok(_) => {
            doc.focus();
            true
        }
        Err(error) => {
            tracing::warn!(source, %error, "edit batch rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_edit_range() {
        let range = create_line_edit_range(5, 20);
        assert_eq!(range.to_string(), "5:1-5:21");

        let range = create_line_edit_range(3, 0);
        assert_eq!(range.to_string(), "3:1-3:1");
        assert!(range.is_empty());
    }

    #[test]
    fn test_line_edit() {
        let edit = create_line_edit(2, "- item", "item");
        assert_eq!(edit.range, TextRange::new(2, 1, 2, 7));
        assert_eq!(edit.text, "item");
        assert!(edit.force_move_markers);

        // Length counts chars, not bytes.
        let edit = create_line_edit(1, "# café", "## café");
        assert_eq!(edit.range.end_column, 7);
    }
}
