//! Undo/redo management for editor operations.
//!
//! Provides:
//! - `UndoManager` trait for abstracting undo implementations
//! - `UndoableBuffer<T>` - wraps a TextBuffer and provides grouped undo/redo

use std::ops::Range;

use smol_str::{SmolStr, ToSmolStr};

use crate::text::TextBuffer;

/// Trait for managing undo/redo operations.
///
/// Implementations must actually perform the undo/redo, not just track state.
/// Operations recorded between `begin_group` and `end_group` form a single
/// undo step; outside a group every operation is its own step.
pub trait UndoManager {
    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;

    /// Undo the most recent step. Returns true if successful.
    fn undo(&mut self) -> bool;

    /// Redo the most recently undone step. Returns true if successful.
    fn redo(&mut self) -> bool;

    /// Clear all undo/redo history.
    fn clear_history(&mut self);

    /// Start collecting operations into one undo step.
    fn begin_group(&mut self);

    /// Close the current undo step.
    fn end_group(&mut self);
}

/// A recorded edit operation for undo/redo.
#[derive(Debug, Clone)]
struct EditOperation {
    /// Undo step this operation belongs to
    group: u64,
    /// Character position where edit occurred
    pos: usize,
    /// Text that was deleted (empty for pure insertions)
    deleted: SmolStr,
    /// Text that was inserted (empty for pure deletions)
    inserted: SmolStr,
}

/// A TextBuffer wrapper that tracks edits and provides undo/redo.
///
/// All mutations go through this wrapper, which records them for undo.
/// `max_steps` bounds the number of undo steps (groups), not raw operations.
#[derive(Clone)]
pub struct UndoableBuffer<T> {
    buffer: T,
    undo_stack: Vec<EditOperation>,
    redo_stack: Vec<EditOperation>,
    max_steps: usize,
    next_group: u64,
    open_group: Option<u64>,
}

impl<T: TextBuffer + Default> Default for UndoableBuffer<T> {
    fn default() -> Self {
        Self::new(T::default(), 100)
    }
}

impl<T: TextBuffer> UndoableBuffer<T> {
    /// Create a new undoable buffer wrapping the given buffer.
    pub fn new(buffer: T, max_steps: usize) -> Self {
        Self {
            buffer,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
            next_group: 0,
            open_group: None,
        }
    }

    /// Number of undo steps currently available.
    pub fn undo_depth(&self) -> usize {
        count_groups(&self.undo_stack)
    }

    fn allocate_group(&mut self) -> u64 {
        let group = self.next_group;
        self.next_group += 1;
        group
    }

    /// Record an operation (called internally by TextBuffer impl).
    fn record_op(&mut self, pos: usize, deleted: &str, inserted: &str) {
        if deleted.is_empty() && inserted.is_empty() {
            return;
        }

        // Clear redo stack on new edit
        self.redo_stack.clear();

        let group = match self.open_group {
            Some(group) => group,
            None => self.allocate_group(),
        };

        self.undo_stack.push(EditOperation {
            group,
            pos,
            deleted: deleted.to_smolstr(),
            inserted: inserted.to_smolstr(),
        });

        // Trim oldest steps if over max
        while count_groups(&self.undo_stack) > self.max_steps {
            let oldest = self.undo_stack[0].group;
            self.undo_stack.retain(|op| op.group != oldest);
        }
    }
}

fn count_groups(stack: &[EditOperation]) -> usize {
    if stack.is_empty() {
        return 0;
    }
    1 + stack.windows(2).filter(|w| w[0].group != w[1].group).count()
}

// Implement TextBuffer by delegating to inner buffer + recording operations
impl<T: TextBuffer> TextBuffer for UndoableBuffer<T> {
    fn len_bytes(&self) -> usize {
        self.buffer.len_bytes()
    }

    fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.buffer.len_lines()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.record_op(char_offset, "", text);
        self.buffer.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        // Get the text being deleted for undo
        let deleted = self.buffer.slice(char_range.clone()).unwrap_or_default();
        self.record_op(char_range.start, &deleted, "");
        self.buffer.delete(char_range);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        self.buffer.slice(char_range)
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        self.buffer.char_at(char_offset)
    }

    fn line(&self, line_idx: usize) -> Option<SmolStr> {
        self.buffer.line(line_idx)
    }

    fn line_to_char(&self, line_idx: usize) -> Option<usize> {
        self.buffer.line_to_char(line_idx)
    }

    fn char_to_line(&self, char_offset: usize) -> Option<usize> {
        self.buffer.char_to_line(char_offset)
    }

    fn to_string(&self) -> String {
        self.buffer.to_string()
    }
}

impl<T: TextBuffer> UndoManager for UndoableBuffer<T> {
    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn undo(&mut self) -> bool {
        let Some(group) = self.undo_stack.last().map(|op| op.group) else {
            return false;
        };

        while self.undo_stack.last().is_some_and(|op| op.group == group) {
            let Some(op) = self.undo_stack.pop() else {
                break;
            };

            // Apply inverse: delete what was inserted, insert what was deleted
            let inserted_chars = op.inserted.chars().count();
            if inserted_chars > 0 {
                self.buffer.delete(op.pos..op.pos + inserted_chars);
            }
            if !op.deleted.is_empty() {
                self.buffer.insert(op.pos, &op.deleted);
            }

            self.redo_stack.push(op);
        }
        true
    }

    fn redo(&mut self) -> bool {
        let Some(group) = self.redo_stack.last().map(|op| op.group) else {
            return false;
        };

        while self.redo_stack.last().is_some_and(|op| op.group == group) {
            let Some(op) = self.redo_stack.pop() else {
                break;
            };

            // Re-apply original: delete what was deleted, insert what was inserted
            let deleted_chars = op.deleted.chars().count();
            if deleted_chars > 0 {
                self.buffer.delete(op.pos..op.pos + deleted_chars);
            }
            if !op.inserted.is_empty() {
                self.buffer.insert(op.pos, &op.inserted);
            }

            self.undo_stack.push(op);
        }
        true
    }

    fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn begin_group(&mut self) {
        if self.open_group.is_none() {
            self.open_group = Some(self.allocate_group());
        }
    }

    fn end_group(&mut self) {
        self.open_group = None;
    }
}
