//! Inline wrap toggles (`**bold**`, `*italic*`).

use crate::document::EditorDocument;
use crate::edit::commit;
use crate::text_helpers::char_slice;
use crate::types::{LineEdit, Position, TextRange};

/// Batch id for wrap toggles.
pub const WRAP_BATCH: &str = "markdown-toolbar";

/// Options for [`apply_wrapped_edit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapOptions {
    /// Unwrap when the markers sit just outside a single-line selection.
    pub allow_inner_toggle: bool,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            allow_inner_toggle: true,
        }
    }
}

/// Toggle `before`/`after` markers around the selection.
///
/// `after` defaults to `before`. The selection is unwrapped when it includes
/// the markers itself, or (with inner toggle enabled) when a single-line
/// selection is directly surrounded by them. Otherwise it is wrapped. An empty
/// selection gets an empty marker pair with the caret in between.
///
/// Afterwards the selection covers the inner text, so toggling again undoes
/// the change.
pub fn apply_wrapped_edit<D: EditorDocument>(
    doc: &mut D,
    before: &str,
    after: Option<&str>,
    options: WrapOptions,
) -> bool {
    let Some(selection) = doc.selection() else {
        return false;
    };
    let selection = selection.normalize();
    let after = after.unwrap_or(before);

    let selected = match doc.value_in_range(selection) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(%error, %selection, "selection is not in the document");
            return false;
        }
    };

    let (target, text, new_selection) = if selected.is_empty() {
        let caret = selection.start().advance(before);
        (selection, format!("{before}{after}"), TextRange::between(caret, caret))
    } else if let Some(inner) = strip_wrapping(&selected, before, after) {
        tracing::debug!(before, after, "unwrapping selection");
        let start = selection.start();
        (selection, inner.to_string(), TextRange::between(start, start.advance(inner)))
    } else if let Some(outer) = options
        .allow_inner_toggle
        .then(|| surrounding_markers(&*doc, selection, before, after))
        .flatten()
    {
        tracing::debug!(before, after, "unwrapping around selection");
        let start = outer.start();
        (outer, selected.to_string(), TextRange::between(start, start.advance(&selected)))
    } else {
        let start = selection.start().advance(before);
        (
            selection,
            format!("{before}{selected}{after}"),
            TextRange::between(start, start.advance(&selected)),
        )
    };

    if !commit(doc, WRAP_BATCH, &[LineEdit::new(target, text)]) {
        return false;
    }
    doc.set_selection(Some(new_selection));
    true
}

/// Inner text when `text` starts with `before`, ends with `after`, and has
/// something in between.
fn strip_wrapping<'a>(text: &'a str, before: &str, after: &str) -> Option<&'a str> {
    if text.len() <= before.len() + after.len() {
        return None;
    }
    text.strip_prefix(before)?.strip_suffix(after)
}

/// Range including markers directly outside a single-line selection.
fn surrounding_markers<D: EditorDocument>(
    doc: &D,
    selection: TextRange,
    before: &str,
    after: &str,
) -> Option<TextRange> {
    if !selection.is_single_line() {
        return None;
    }
    let line = doc.line_content(selection.start_line)?;
    let before_len = before.chars().count();
    let after_len = after.chars().count();

    let start = (selection.start_column - 1).checked_sub(before_len)?;
    let end = selection.end_column - 1;
    if char_slice(&line, start, start + before_len)? != before {
        return None;
    }
    if char_slice(&line, end, end + after_len)? != after {
        return None;
    }

    Some(TextRange::between(
        Position::new(selection.start_line, start + 1),
        Position::new(selection.start_line, end + after_len + 1),
    ))
}
