//! Line parsing and marker detection.
//!
//! A line is split into its leading whitespace and the content after it. The
//! content is then checked against an ordered list of candidate markers; the
//! first candidate that matches wins, so callers control priority (a toggle
//! passes its own marker first).

/// A line split into indentation and content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Leading whitespace (spaces, tabs, and other Unicode whitespace).
    pub leading_whitespace: &'a str,
    /// Everything after the leading whitespace.
    pub content: &'a str,
}

/// Split a line into leading whitespace and content.
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    let content = line.trim_start();
    let split = line.len() - content.len();
    ParsedLine {
        leading_whitespace: &line[..split],
        content,
    }
}

/// Result of checking line content against candidate markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixMatch<'m, 't> {
    /// The candidate that matched, if any.
    pub matched: Option<&'m str>,
    /// Content with the matched marker and its separating space removed. When
    /// nothing matched, the content with leading whitespace removed.
    pub stripped: &'t str,
}

/// Match a single marker at the start of already-trimmed content.
///
/// A marker matches when it is followed by a space, or when it is the whole
/// content. Returns the remainder after the marker and space.
pub(crate) fn match_marker<'t>(trimmed: &'t str, marker: &str) -> Option<&'t str> {
    let rest = trimmed.strip_prefix(marker)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

/// Find the first candidate marker at the start of `content`.
///
/// Candidates are tried in the order given. Blank candidates never match.
pub fn detect_prefix<'m, 't>(content: &'t str, candidates: &[&'m str]) -> PrefixMatch<'m, 't> {
    let trimmed = content.trim_start();
    for &candidate in candidates {
        if candidate.trim().is_empty() {
            continue;
        }
        if let Some(stripped) = match_marker(trimmed, candidate) {
            return PrefixMatch {
                matched: Some(candidate),
                stripped,
            };
        }
    }
    PrefixMatch {
        matched: None,
        stripped: trimmed,
    }
}

/// Check whether every line starts with `prefix`, as resolved against
/// `candidates`.
///
/// A line beginning with a higher-priority candidate that merely shares
/// characters with `prefix` does not count. True for an empty slice.
pub fn all_lines_have_prefix<S: AsRef<str>>(lines: &[S], prefix: &str, candidates: &[&str]) -> bool {
    let target = prefix.trim();
    lines.iter().all(|line| {
        let parsed = parse_line(line.as_ref());
        detect_prefix(parsed.content, candidates).matched == Some(target)
    })
}
