//! Core editor document trait and implementations.
//!
//! Defines the `EditorDocument` trait, the contract every toolbar command is
//! written against: line access, the current selection, text extraction and
//! atomic application of edit batches.

use std::ops::Range;

use smol_str::SmolStr;

use crate::error::EditError;
use crate::text::TextBuffer;
use crate::types::{BatchInfo, LineEdit, Position, TextRange};
use crate::undo::UndoManager;

/// Core trait for editor documents.
///
/// The trait is generic over the buffer type, which must implement both
/// `TextBuffer` (for text operations) and `UndoManager` (for undo/redo).
/// Line numbers and columns are 1-based throughout.
pub trait EditorDocument {
    /// The buffer type used for text storage and undo.
    type Buffer: TextBuffer + UndoManager;

    // === Required: Buffer access ===

    /// Get a reference to the underlying buffer.
    fn buffer(&self) -> &Self::Buffer;

    /// Get a mutable reference to the underlying buffer.
    fn buffer_mut(&mut self) -> &mut Self::Buffer;

    // === Required: Selection state ===

    /// Get the current selection. `None` when the host has no selection to
    /// offer; toolbar commands do nothing in that case.
    fn selection(&self) -> Option<TextRange>;

    /// Set the selection.
    fn set_selection(&mut self, selection: Option<TextRange>);

    // === Required: Batch tracking ===

    /// Get the last applied batch, if any.
    fn last_batch(&self) -> Option<BatchInfo>;

    /// Record the last applied batch.
    fn set_last_batch(&mut self, batch: Option<BatchInfo>);

    // === Required: Focus ===

    /// Return input focus to the editing surface.
    fn focus(&mut self);

    // === Provided: Convenience accessors ===

    /// Get the full content as a String.
    fn content_string(&self) -> String {
        self.buffer().to_string()
    }

    /// Get length in characters.
    fn len_chars(&self) -> usize {
        self.buffer().len_chars()
    }

    /// Check if document is empty.
    fn is_empty(&self) -> bool {
        self.buffer().len_chars() == 0
    }

    /// Number of lines in the document (at least 1).
    fn line_count(&self) -> usize {
        self.buffer().len_lines()
    }

    /// Content of line `line_number`, without its terminator.
    fn line_content(&self, line_number: usize) -> Option<SmolStr> {
        let idx = line_number.checked_sub(1)?;
        self.buffer().line(idx)
    }

    /// Length of line `line_number` in chars.
    fn line_length(&self, line_number: usize) -> Option<usize> {
        self.line_content(line_number)
            .map(|line| line.chars().count())
    }

    /// Convert a position to a char offset.
    fn offset_at(&self, position: Position) -> Result<usize, EditError> {
        let line_count = self.line_count();
        let line_start = position
            .line
            .checked_sub(1)
            .and_then(|idx| self.buffer().line_to_char(idx));
        let (Some(line_start), Some(line_length)) = (line_start, self.line_length(position.line))
        else {
            return Err(EditError::LineOutOfBounds {
                line: position.line,
                line_count,
            });
        };

        let max = line_length + 1;
        if position.column == 0 || position.column > max {
            return Err(EditError::ColumnOutOfBounds {
                line: position.line,
                column: position.column,
                max,
            });
        }
        Ok(line_start + position.column - 1)
    }

    /// Convert a char offset to a position.
    fn position_at(&self, offset: usize) -> Option<Position> {
        let idx = self.buffer().char_to_line(offset)?;
        let line_start = self.buffer().line_to_char(idx)?;
        Some(Position::new(idx + 1, offset - line_start + 1))
    }

    /// Convert a range to an ordered char range.
    fn offset_range(&self, range: TextRange) -> Result<Range<usize>, EditError> {
        let range = range.normalize();
        Ok(self.offset_at(range.start())?..self.offset_at(range.end())?)
    }

    /// Text covered by `range`.
    fn value_in_range(&self, range: TextRange) -> Result<SmolStr, EditError> {
        let chars = self.offset_range(range)?;
        Ok(self.buffer().slice(chars).unwrap_or_default())
    }

    /// Get selected text, if any.
    fn selected_text(&self) -> Option<SmolStr> {
        self.selection()
            .and_then(|sel| self.value_in_range(sel).ok())
    }

    /// Whether a non-empty selection exists.
    fn has_selection(&self) -> bool {
        self.selection().is_some_and(|sel| !sel.is_empty())
    }

    // === Provided: Batch application ===

    /// Apply `edits` as one atomic batch tagged `source`.
    ///
    /// Every range is resolved against the document as it is before the batch,
    /// so edits never have to account for each other. Overlapping edits are
    /// rejected and nothing is applied. The whole batch is a single undo step,
    /// and the selection is carried through the edits.
    fn apply_edits(&mut self, source: &str, edits: &[LineEdit]) -> Result<BatchInfo, EditError> {
        let mut resolved = edits
            .iter()
            .map(|edit| Ok((self.offset_range(edit.range)?, edit)))
            .collect::<Result<Vec<_>, EditError>>()?;
        resolved.sort_by_key(|(range, _)| range.start);

        for pair in resolved.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.0.start < prev.0.end {
                return Err(EditError::OverlappingEdits {
                    first: prev.1.range,
                    second: next.1.range,
                });
            }
        }

        let mut selection = self
            .selection()
            .and_then(|sel| Some((self.offset_at(sel.start()).ok()?, self.offset_at(sel.end()).ok()?)));

        let mut inserted_len = 0;
        let mut deleted_len = 0;

        self.buffer_mut().begin_group();
        // Back to front, so earlier offsets stay valid.
        for (range, edit) in resolved.iter().rev() {
            let new_len = edit.text.chars().count();
            self.buffer_mut().replace(range.clone(), &edit.text);
            inserted_len += new_len;
            deleted_len += range.len();

            if let Some((anchor, head)) = selection.as_mut() {
                *anchor = map_offset(*anchor, range, new_len, edit.force_move_markers);
                *head = map_offset(*head, range, new_len, edit.force_move_markers);
            }
        }
        self.buffer_mut().end_group();

        if let Some((anchor, head)) = selection {
            let mapped = self
                .position_at(anchor)
                .zip(self.position_at(head))
                .map(|(a, h)| TextRange::new(a.line, a.column, h.line, h.column));
            self.set_selection(mapped);
        }

        let batch = BatchInfo {
            source: source.into(),
            edit_count: edits.len(),
            inserted_len,
            deleted_len,
        };
        tracing::debug!(
            source,
            edits = batch.edit_count,
            inserted = inserted_len,
            deleted = deleted_len,
            "applied edit batch"
        );
        self.set_last_batch(Some(batch.clone()));
        Ok(batch)
    }

    // === Provided: Undo/Redo ===

    fn undo(&mut self) -> bool {
        self.buffer_mut().undo()
    }

    fn redo(&mut self) -> bool {
        self.buffer_mut().redo()
    }

    fn can_undo(&self) -> bool {
        self.buffer().can_undo()
    }

    fn can_redo(&self) -> bool {
        self.buffer().can_redo()
    }

    fn clear_history(&mut self) {
        self.buffer_mut().clear_history();
    }
}

/// Carry an offset through the replacement of `range` by `new_len` chars.
fn map_offset(offset: usize, range: &Range<usize>, new_len: usize, force_move: bool) -> usize {
    let at_insertion_point = offset == range.start && range.is_empty() && force_move;
    if offset < range.start || (offset == range.start && !at_insertion_point) {
        offset
    } else if offset >= range.end {
        offset - range.len() + new_len
    } else {
        range.start + new_len
    }
}

/// Simple field-based implementation of EditorDocument.
///
/// Stores selection, batch and focus state as plain fields.
/// Use this for non-reactive contexts or as a base for testing.
#[derive(Clone)]
pub struct PlainEditor<T: TextBuffer + UndoManager> {
    buffer: T,
    selection: Option<TextRange>,
    last_batch: Option<BatchInfo>,
    focused: bool,
}

impl<T: TextBuffer + UndoManager + Default> Default for PlainEditor<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: TextBuffer + UndoManager> PlainEditor<T> {
    /// Create a new editor with the given buffer and the caret at 1:1.
    pub fn new(buffer: T) -> Self {
        Self {
            buffer,
            selection: Some(TextRange::caret(1, 1)),
            last_batch: None,
            focused: false,
        }
    }

    /// Whether `focus` has been called since the editor was created or blurred.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }
}

impl<T: TextBuffer + UndoManager> EditorDocument for PlainEditor<T> {
    type Buffer = T;

    fn buffer(&self) -> &Self::Buffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut Self::Buffer {
        &mut self.buffer
    }

    fn selection(&self) -> Option<TextRange> {
        self.selection
    }

    fn set_selection(&mut self, selection: Option<TextRange>) {
        self.selection = selection;
    }

    fn last_batch(&self) -> Option<BatchInfo> {
        self.last_batch.clone()
    }

    fn set_last_batch(&mut self, batch: Option<BatchInfo>) {
        self.last_batch = batch;
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}
