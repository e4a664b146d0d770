//! Error types for document edits, marker sets, configuration and shortcuts.
//!
//! Toolbar commands never return these to their caller: they log the failure
//! and report that nothing was done.

use smol_str::SmolStr;
use thiserror::Error;

use crate::types::TextRange;

/// A batch of edits could not be applied to the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Line number outside `1..=line_count`.
    #[error("line {line} is out of bounds (document has {line_count} lines)")]
    LineOutOfBounds { line: usize, line_count: usize },

    /// Column outside `1..=line_length + 1`.
    #[error("column {column} is out of bounds on line {line} (max {max})")]
    ColumnOutOfBounds {
        line: usize,
        column: usize,
        max: usize,
    },

    /// Two edits in the same batch touch the same text.
    #[error("edits {first} and {second} overlap")]
    OverlappingEdits { first: TextRange, second: TextRange },
}

/// A marker set was built from an invalid marker list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    /// The marker at `index` is empty after trimming.
    #[error("marker #{index} is empty")]
    Empty { index: usize },

    /// Markers are separated from content by a space, so they cannot contain one.
    #[error("marker {0:?} contains whitespace")]
    ContainsWhitespace(SmolStr),

    /// The same marker was listed twice.
    #[error("marker {0:?} is listed more than once")]
    Duplicate(SmolStr),
}

/// Toolbar configuration failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A marker set built from the config is invalid.
    #[error("invalid {field} markers")]
    Marker {
        field: &'static str,
        #[source]
        source: MarkerError,
    },

    /// Inline wrap markers must be non-empty.
    #[error("{field} marker must not be empty")]
    EmptyWrapMarker { field: &'static str },

    /// Inline wrap markers must not contain line breaks.
    #[error("{field} marker must not contain a line break")]
    MultilineWrapMarker { field: &'static str },

    /// The heading marker is repeated to build `#`, `##`, `###`.
    #[error("heading marker {0:?} must be a visible character")]
    InvisibleHeadingMarker(char),
}

/// A keyboard shortcut string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyComboError {
    #[error("empty key combination")]
    Empty,

    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),

    #[error("unknown key {0:?}")]
    UnknownKey(String),
}

/// A command name did not match any toolbar command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command {0:?}")]
pub struct UnknownCommand(pub String);
