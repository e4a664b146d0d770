//! Link and image insertion.

use crate::document::EditorDocument;
use crate::edit::commit;
use crate::types::{LineEdit, TextRange};

/// Batch id for link insertion.
pub const LINK_BATCH: &str = "markdown-toolbar-link";

/// Batch id for image insertion.
pub const IMAGE_BATCH: &str = "markdown-toolbar-image";

/// Display text used for a link when nothing is selected.
pub const LINK_PLACEHOLDER: &str = "link text";

/// Alt text used for an image when nothing is selected.
pub const IMAGE_PLACEHOLDER: &str = "alt text";

/// Replace the selection with `[selected_text]()` (or `![selected_text]()`)
/// and put the caret inside the empty URL.
pub fn insert_markdown_link_or_image<D: EditorDocument>(doc: &mut D, selected_text: &str, is_image: bool) -> bool {
    let placeholder = if is_image {
        IMAGE_PLACEHOLDER
    } else {
        LINK_PLACEHOLDER
    };
    insert_reference(doc, selected_text, is_image, placeholder)
}

/// Like [`insert_markdown_link_or_image`], with a custom placeholder for an
/// empty selection.
pub fn insert_reference<D: EditorDocument>(
    doc: &mut D,
    selected_text: &str,
    is_image: bool,
    placeholder: &str,
) -> bool {
    let Some(selection) = doc.selection() else {
        return false;
    };
    let selection = selection.normalize();

    let display_text = if selected_text.is_empty() {
        placeholder
    } else {
        selected_text
    };
    let bang = if is_image { "!" } else { "" };
    let text = format!("{bang}[{display_text}]()");

    // Caret goes before the closing paren.
    let url_start = text.len() - 1;
    let caret = selection.start().advance(&text[..url_start]);

    let source = if is_image { IMAGE_BATCH } else { LINK_BATCH };
    tracing::debug!(source, display_text, "inserting reference");
    if !commit(doc, source, &[LineEdit::new(selection, text)]) {
        return false;
    }
    doc.set_selection(Some(TextRange::between(caret, caret)));
    true
}
