//! marktoggle-core: markdown toolbar commands over a plain-text document.
//!
//! This crate provides:
//! - `TextBuffer` trait for text storage abstraction
//! - `EditorRope` - ropey-backed implementation
//! - `UndoableBuffer<T>` - grouped undo/redo over any buffer
//! - `EditorDocument` - the document contract, with `PlainEditor<T>` as a host
//! - Line-prefix, ordered-list, wrap and link commands, all generic over
//!   `EditorDocument`
//! - `Toolbar` - commands and keybindings bound to one document

pub mod actions;
pub mod config;
pub mod document;
pub mod edit;
pub mod error;
pub mod execute;
pub mod line;
pub mod link;
pub mod marker;
pub mod text;
pub mod text_helpers;
pub mod toggle;
pub mod toolbar;
pub mod types;
pub mod undo;
pub mod wrap;

pub use actions::{Key, KeyCombo, KeybindingConfig, KeydownResult, MarkdownCommand, Modifiers};
pub use config::{CommandMarkers, ToolbarConfig};
pub use document::{EditorDocument, PlainEditor};
pub use edit::{create_line_edit, create_line_edit_range};
pub use error::{ConfigError, EditError, KeyComboError, MarkerError, UnknownCommand};
pub use execute::{execute_command, handle_keydown_with_bindings};
pub use line::{ParsedLine, PrefixMatch, all_lines_have_prefix, detect_prefix, parse_line};
pub use link::{IMAGE_BATCH, LINK_BATCH, insert_markdown_link_or_image, insert_reference};
pub use marker::MarkerSet;
pub use smol_str::SmolStr;
pub use text::{EditorRope, TextBuffer};
pub use toggle::{
    ORDERED_LIST_BATCH, PREFIX_BATCH, apply_line_prefix_toggle, apply_marker_toggle,
    apply_ordered_list_toggle,
};
pub use toolbar::Toolbar;
pub use types::{BatchInfo, LineEdit, Position, TextRange};
pub use undo::{UndoManager, UndoableBuffer};
pub use wrap::{WRAP_BATCH, WrapOptions, apply_wrapped_edit};
