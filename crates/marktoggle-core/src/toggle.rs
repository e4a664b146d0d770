//! Line-prefix toggles: headings, unordered lists and ordered lists.
//!
//! Each toggle looks at every line the selection touches. If all of them
//! already carry the marker the command removes it; otherwise it normalises
//! every line to carry it, replacing whatever competing marker was there.

use crate::document::EditorDocument;
use crate::edit::{commit, create_line_edit, selected_lines};
use crate::line::{PrefixMatch, all_lines_have_prefix, detect_prefix, parse_line};
use crate::marker::{MarkerSet, match_marked_item, match_ordered_item, strip_ordered_number};
use crate::text_helpers::collapse_leading_whitespace;
use crate::types::LineEdit;

/// Batch id for heading and unordered-list toggles.
pub const PREFIX_BATCH: &str = "markdown-toolbar-prefix";

/// Batch id for ordered-list toggles.
pub const ORDERED_LIST_BATCH: &str = "markdown-toolbar-ordered-list";

/// Toggle `prefix` on the selected lines.
///
/// `alternatives` are markers that compete for the same slot (other heading
/// levels, other list styles). They are recognised and replaced when toggling
/// on, but only `prefix` itself counts towards toggling off.
pub fn apply_line_prefix_toggle<D: EditorDocument>(doc: &mut D, prefix: &str, alternatives: &[&str]) -> bool {
    let Some(lines) = selected_lines(doc) else {
        return false;
    };
    let target = prefix.trim();
    let candidates: Vec<&str> = std::iter::once(target)
        .chain(alternatives.iter().map(|alt| alt.trim()))
        .collect();

    let texts: Vec<&str> = lines.iter().map(|(_, line)| line.as_str()).collect();
    let toggle_off = all_lines_have_prefix(&texts, target, &candidates);

    let edits = build_prefix_edits(&lines, target, toggle_off, |content| {
        detect_prefix(content, &candidates)
    });
    commit(doc, PREFIX_BATCH, &edits)
}

/// Toggle the target marker of a precompiled `markers` set on the selected
/// lines. The remaining markers in the set act as alternatives.
pub fn apply_marker_toggle<D: EditorDocument>(doc: &mut D, markers: &MarkerSet) -> bool {
    let Some(target) = markers.target() else {
        tracing::debug!("marker toggle with an empty marker set");
        return false;
    };
    let Some(lines) = selected_lines(doc) else {
        return false;
    };

    let toggle_off = markers.all_lines_match(lines.iter().map(|(_, line)| line));
    let edits = build_prefix_edits(&lines, target, toggle_off, |content| markers.detect(content));
    commit(doc, PREFIX_BATCH, &edits)
}

fn build_prefix_edits<'m, L, F>(lines: &[(usize, L)], target: &str, toggle_off: bool, detect: F) -> Vec<LineEdit>
where
    L: AsRef<str>,
    F: for<'t> Fn(&'t str) -> PrefixMatch<'m, 't>,
{
    let strip_numbers = is_bullet_marker(target);
    tracing::debug!(target, lines = lines.len(), toggle_off, "toggling line prefix");

    lines
        .iter()
        .map(|(line_number, line)| {
            let line = line.as_ref();
            let parsed = parse_line(line);
            let detected = detect(parsed.content);

            let new_text = if toggle_off && detected.matched == Some(target) {
                format!(
                    "{}{}",
                    parsed.leading_whitespace,
                    collapse_leading_whitespace(detected.stripped)
                )
            } else {
                // At most one marker is removed per line.
                let base = match detected.matched {
                    Some(_) => detected.stripped,
                    None if strip_numbers => strip_ordered_number(parsed.content),
                    None => parsed.content,
                };
                format!("{}{} {}", parsed.leading_whitespace, target, base)
            };

            tracing::trace!(line = line_number, %new_text, "prefix edit");
            create_line_edit(*line_number, line, new_text)
        })
        .collect()
}

/// Unordered-list markers replace ordered numbering when toggled on.
fn is_bullet_marker(marker: &str) -> bool {
    matches!(marker, "-" | "*" | "+")
}

/// Toggle ordered-list numbering on the selected lines.
///
/// If every line is already an ordered item the numbers are removed.
/// Otherwise every line is numbered from 1 in selection order, replacing
/// existing numbers and any of the `alternatives` markers.
pub fn apply_ordered_list_toggle<D: EditorDocument>(doc: &mut D, alternatives: &[&str]) -> bool {
    let Some(lines) = selected_lines(doc) else {
        return false;
    };

    let toggle_off = lines.iter().all(|(_, line)| match_ordered_item(line).is_some());
    tracing::debug!(lines = lines.len(), toggle_off, "toggling ordered list");

    let edits: Vec<LineEdit> = lines
        .iter()
        .enumerate()
        .map(|(i, (line_number, line))| {
            let (indent, content, ordered) = split_list_item(line, alternatives);
            let new_text = if toggle_off && ordered {
                format!("{indent}{content}")
            } else {
                format!("{indent}{}. {content}", i + 1)
            };
            create_line_edit(*line_number, line, new_text)
        })
        .collect();
    commit(doc, ORDERED_LIST_BATCH, &edits)
}

/// Split a line into indent and content, dropping any ordered number or
/// alternative list marker. The flag reports whether the line was ordered.
fn split_list_item<'a>(line: &'a str, alternatives: &[&str]) -> (&'a str, &'a str, bool) {
    if let Some(item) = match_ordered_item(line) {
        return (item.indent, item.content, true);
    }
    if let Some(item) = alternatives
        .iter()
        .find_map(|alt| match_marked_item(line, alt.trim()))
    {
        return (item.indent, item.content, false);
    }
    let parsed = parse_line(line);
    (parsed.leading_whitespace, parsed.content, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextRange;
    use crate::{EditorRope, PlainEditor, UndoableBuffer};

    type TestEditor = PlainEditor<UndoableBuffer<EditorRope>>;

    fn make_editor(content: &str) -> TestEditor {
        let rope = EditorRope::from_str(content);
        let buf = UndoableBuffer::new(rope, 100);
        PlainEditor::new(buf)
    }

    fn select_lines(editor: &mut TestEditor, first: usize, last: usize) {
        let len = editor.line_length(last).unwrap();
        editor.set_selection(Some(TextRange::new(first, 1, last, len + 1)));
    }

    #[test]
    fn test_heading_toggle_on_and_off() {
        let mut editor = make_editor("Title");
        assert!(apply_line_prefix_toggle(&mut editor, "#", &["##", "###"]));
        assert_eq!(editor.content_string(), "# Title");

        assert!(apply_line_prefix_toggle(&mut editor, "#", &["##", "###"]));
        assert_eq!(editor.content_string(), "Title");
    }

    #[test]
    fn test_heading_level_switch() {
        let mut editor = make_editor("# Title");
        apply_line_prefix_toggle(&mut editor, "##", &["#", "###"]);
        assert_eq!(editor.content_string(), "## Title");

        apply_line_prefix_toggle(&mut editor, "###", &["#", "##"]);
        assert_eq!(editor.content_string(), "### Title");

        apply_line_prefix_toggle(&mut editor, "#", &["##", "###"]);
        assert_eq!(editor.content_string(), "# Title");
    }

    #[test]
    fn test_unordered_list_round_trip() {
        let mut editor = make_editor("- item 1\n- item 2");
        select_lines(&mut editor, 1, 2);

        assert!(apply_line_prefix_toggle(&mut editor, "-", &["1."]));
        assert_eq!(editor.content_string(), "item 1\nitem 2");

        select_lines(&mut editor, 1, 2);
        assert!(apply_line_prefix_toggle(&mut editor, "-", &["1."]));
        assert_eq!(editor.content_string(), "- item 1\n- item 2");
    }

    #[test]
    fn test_mixed_selection_toggles_on() {
        let mut editor = make_editor("- done\nnot yet");
        select_lines(&mut editor, 1, 2);
        apply_line_prefix_toggle(&mut editor, "-", &["1."]);
        assert_eq!(editor.content_string(), "- done\n- not yet");
    }

    #[test]
    fn test_unordered_replaces_numbers() {
        let mut editor = make_editor("1. one\n2. two\n10. ten");
        select_lines(&mut editor, 1, 3);
        apply_line_prefix_toggle(&mut editor, "-", &["1."]);
        assert_eq!(editor.content_string(), "- one\n- two\n- ten");
    }

    #[test]
    fn test_bullet_toggle_removes_one_marker_per_line() {
        let mut editor = make_editor("- 3. wins\nplain");
        select_lines(&mut editor, 1, 2);
        apply_line_prefix_toggle(&mut editor, "-", &["1."]);
        assert_eq!(editor.content_string(), "- 3. wins\n- plain");

        let mut editor = make_editor("1. 2024. year\nplain");
        select_lines(&mut editor, 1, 2);
        apply_line_prefix_toggle(&mut editor, "-", &["1."]);
        assert_eq!(editor.content_string(), "- 2024. year\n- plain");

        let markers = MarkerSet::with_target("-", &["1."]).unwrap();
        let mut editor = make_editor("- 3. wins\n7. 2024. year\nplain");
        select_lines(&mut editor, 1, 3);
        apply_marker_toggle(&mut editor, &markers);
        assert_eq!(editor.content_string(), "- 3. wins\n- 2024. year\n- plain");
    }

    #[test]
    fn test_indentation_preserved() {
        let mut editor = make_editor("  nested\n\tdeeper");
        select_lines(&mut editor, 1, 2);
        apply_line_prefix_toggle(&mut editor, "-", &["1."]);
        assert_eq!(editor.content_string(), "  - nested\n\t- deeper");

        select_lines(&mut editor, 1, 2);
        apply_line_prefix_toggle(&mut editor, "-", &["1."]);
        assert_eq!(editor.content_string(), "  nested\n\tdeeper");
    }

    #[test]
    fn test_toggle_off_collapses_extra_spacing() {
        let mut editor = make_editor("#    spaced");
        apply_line_prefix_toggle(&mut editor, "#", &["##", "###"]);
        assert_eq!(editor.content_string(), " spaced");
    }

    #[test]
    fn test_bare_marker_and_empty_lines() {
        let mut editor = make_editor("#");
        apply_line_prefix_toggle(&mut editor, "#", &["##", "###"]);
        assert_eq!(editor.content_string(), "");

        apply_line_prefix_toggle(&mut editor, "#", &["##", "###"]);
        assert_eq!(editor.content_string(), "# ");
    }

    #[test]
    fn test_malformed_alternatives_fall_back_to_toggle_on() {
        let mut editor = make_editor("text");
        assert!(apply_line_prefix_toggle(&mut editor, "-", &["", "   "]));
        assert_eq!(editor.content_string(), "- text");
    }

    #[test]
    fn test_prefix_toggle_is_one_batch() {
        let mut editor = make_editor("a\nb\nc");
        select_lines(&mut editor, 1, 3);
        apply_line_prefix_toggle(&mut editor, "-", &["1."]);
        assert_eq!(editor.content_string(), "- a\n- b\n- c");

        let batch = editor.last_batch().unwrap();
        assert_eq!(batch.source, PREFIX_BATCH);
        assert_eq!(batch.edit_count, 3);
        assert!(editor.is_focused());

        assert!(editor.undo());
        assert_eq!(editor.content_string(), "a\nb\nc");
    }

    #[test]
    fn test_no_selection_is_a_no_op() {
        let mut editor = make_editor("text");
        editor.set_selection(None);
        assert!(!apply_line_prefix_toggle(&mut editor, "#", &[]));
        assert!(!apply_ordered_list_toggle(&mut editor, &["-"]));
        assert_eq!(editor.content_string(), "text");
        assert!(!editor.is_focused());
    }

    #[test]
    fn test_selection_outside_document_is_a_no_op() {
        let mut editor = make_editor("text");
        editor.set_selection(Some(TextRange::new(1, 1, 4, 1)));
        assert!(!apply_line_prefix_toggle(&mut editor, "#", &[]));
        assert_eq!(editor.content_string(), "text");
    }

    #[test]
    fn test_marker_toggle_matches_free_function() {
        let markers = MarkerSet::with_target("##", &["#", "###"]).unwrap();
        let mut editor = make_editor("# one\n### two\nthree");
        select_lines(&mut editor, 1, 3);
        assert!(apply_marker_toggle(&mut editor, &markers));
        assert_eq!(editor.content_string(), "## one\n## two\n## three");

        select_lines(&mut editor, 1, 3);
        assert!(apply_marker_toggle(&mut editor, &markers));
        assert_eq!(editor.content_string(), "one\ntwo\nthree");
    }

    #[test]
    fn test_marker_toggle_empty_set() {
        let mut editor = make_editor("text");
        assert!(!apply_marker_toggle(&mut editor, &MarkerSet::empty()));
        assert_eq!(editor.content_string(), "text");
    }

    #[test]
    fn test_ordered_list_toggle_on_and_off() {
        let mut editor = make_editor("first\nsecond");
        select_lines(&mut editor, 1, 2);
        assert!(apply_ordered_list_toggle(&mut editor, &["-"]));
        assert_eq!(editor.content_string(), "1. first\n2. second");
        assert_eq!(editor.last_batch().unwrap().source, ORDERED_LIST_BATCH);

        select_lines(&mut editor, 1, 2);
        assert!(apply_ordered_list_toggle(&mut editor, &["-"]));
        assert_eq!(editor.content_string(), "first\nsecond");
    }

    #[test]
    fn test_ordered_list_alternatives_are_trimmed() {
        let mut editor = make_editor("- a\n- b");
        select_lines(&mut editor, 1, 2);
        assert!(apply_ordered_list_toggle(&mut editor, &[" - "]));
        assert_eq!(editor.content_string(), "1. a\n2. b");
    }

    #[test]
    fn test_ordered_list_renumbers() {
        let mut editor = make_editor("5. a\n2. b\n9. c\nd");
        select_lines(&mut editor, 1, 4);
        apply_ordered_list_toggle(&mut editor, &["-"]);
        assert_eq!(editor.content_string(), "1. a\n2. b\n3. c\n4. d");
    }

    #[test]
    fn test_ordered_list_replaces_alternatives() {
        let mut editor = make_editor("- a\n  - b\n* c");
        select_lines(&mut editor, 1, 3);
        apply_ordered_list_toggle(&mut editor, &["-"]);
        // "*" is not an alternative here, so it stays as content.
        assert_eq!(editor.content_string(), "1. a\n  2. b\n3. * c");
    }

    #[test]
    fn test_ordered_list_toggle_off_keeps_indent() {
        let mut editor = make_editor("  3. x\n  4.\ty");
        select_lines(&mut editor, 1, 2);
        apply_ordered_list_toggle(&mut editor, &["-"]);
        assert_eq!(editor.content_string(), "  x\n  y");
    }

    #[test]
    fn test_ordered_list_literal_alternatives() {
        // "+" is matched literally, not as a regex quantifier.
        let mut editor = make_editor("+ plus\n++ double");
        select_lines(&mut editor, 1, 2);
        apply_ordered_list_toggle(&mut editor, &["+"]);
        assert_eq!(editor.content_string(), "1. plus\n2. ++ double");
    }
}
