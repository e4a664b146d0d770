//! Precompiled marker tables and list-item scanners.
//!
//! `MarkerSet` is an ordered table of literal markers validated once up front.
//! Markers are compared as plain text, so characters like `.`, `*` or `(` have
//! no special meaning. The list scanners recognise `1. item` style ordered
//! items and `<marker> item` style items without compiling patterns.

use smol_str::SmolStr;

use crate::error::MarkerError;
use crate::line::{PrefixMatch, match_marker, parse_line};

/// An ordered, validated set of literal line markers.
///
/// Order is priority: `detect` reports the first marker that matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<SmolStr>,
    /// Bitmap of the first bytes of all markers, for a quick reject.
    lead_bytes: [u64; 4],
}

impl MarkerSet {
    /// Build a set from markers in priority order.
    ///
    /// Markers are trimmed. Empty markers, markers containing whitespace, and
    /// duplicates are rejected.
    pub fn new<I, S>(markers: I) -> Result<Self, MarkerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for (index, marker) in markers.into_iter().enumerate() {
            let marker = marker.as_ref().trim();
            if marker.is_empty() {
                return Err(MarkerError::Empty { index });
            }
            if marker.chars().any(char::is_whitespace) {
                return Err(MarkerError::ContainsWhitespace(marker.into()));
            }
            if set.contains(marker) {
                return Err(MarkerError::Duplicate(marker.into()));
            }
            let lead = marker.as_bytes()[0];
            set.lead_bytes[usize::from(lead >> 6)] |= 1 << (lead & 63);
            set.markers.push(marker.into());
        }
        Ok(set)
    }

    /// Build a set with `target` first, followed by `alternatives`.
    pub fn with_target<S: AsRef<str>>(target: &str, alternatives: &[S]) -> Result<Self, MarkerError> {
        Self::new(std::iter::once(target).chain(alternatives.iter().map(|alt| alt.as_ref())))
    }

    /// A set with no markers. Nothing matches it.
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
            lead_bytes: [0; 4],
        }
    }

    /// The highest-priority marker.
    pub fn target(&self) -> Option<&str> {
        self.markers.first().map(SmolStr::as_str)
    }

    /// Markers in priority order.
    pub fn markers(&self) -> impl Iterator<Item = &str> + '_ {
        self.markers.iter().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    /// Find the first marker at the start of `content`.
    ///
    /// Same matching rule as [`detect_prefix`](crate::line::detect_prefix):
    /// the marker must be followed by a space or end the content.
    pub fn detect<'t>(&self, content: &'t str) -> PrefixMatch<'_, 't> {
        let trimmed = content.trim_start();
        let no_match = PrefixMatch {
            matched: None,
            stripped: trimmed,
        };

        let Some(&lead) = trimmed.as_bytes().first() else {
            return no_match;
        };
        if self.lead_bytes[usize::from(lead >> 6)] & (1 << (lead & 63)) == 0 {
            return no_match;
        }

        for marker in &self.markers {
            if let Some(stripped) = match_marker(trimmed, marker) {
                return PrefixMatch {
                    matched: Some(marker.as_str()),
                    stripped,
                };
            }
        }
        no_match
    }

    /// Check whether every line starts with the target marker, as resolved
    /// against the whole set. True when there are no lines.
    pub fn all_lines_match<I, S>(&self, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(target) = self.target() else {
            return false;
        };
        lines.into_iter().all(|line| {
            let parsed = parse_line(line.as_ref());
            self.detect(parsed.content).matched == Some(target)
        })
    }
}

/// An ordered list item: `<indent><digits>.<whitespace><content>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderedItem<'a> {
    pub indent: &'a str,
    pub number: &'a str,
    pub content: &'a str,
}

/// A list item introduced by a literal marker: `<indent><marker><whitespace><content>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkedItem<'a> {
    pub indent: &'a str,
    pub content: &'a str,
}

/// Match an ordered list item. At least one ASCII digit, a `.`, and at least
/// one whitespace character are required.
pub fn match_ordered_item(line: &str) -> Option<OrderedItem<'_>> {
    let parsed = parse_line(line);
    let rest = parsed.content;

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let after_dot = rest[digits..].strip_prefix('.')?;
    let content = after_dot.trim_start();
    if content.len() == after_dot.len() {
        return None;
    }

    Some(OrderedItem {
        indent: parsed.leading_whitespace,
        number: &rest[..digits],
        content,
    })
}

/// Match a list item introduced by `marker`, taken literally and followed by
/// at least one whitespace character.
pub fn match_marked_item<'a>(line: &'a str, marker: &str) -> Option<MarkedItem<'a>> {
    if marker.is_empty() {
        return None;
    }
    let parsed = parse_line(line);
    let after_marker = parsed.content.strip_prefix(marker)?;
    let content = after_marker.trim_start();
    if content.len() == after_marker.len() {
        return None;
    }

    Some(MarkedItem {
        indent: parsed.leading_whitespace,
        content,
    })
}

/// Remove an ordered-list number (`12. `) from the start of `content`.
pub fn strip_ordered_number(content: &str) -> &str {
    match match_ordered_item(content) {
        Some(item) if item.indent.is_empty() => item.content,
        _ => content,
    }
}
