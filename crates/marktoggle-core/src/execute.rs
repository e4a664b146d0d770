//! Command execution for editor documents.
//!
//! `execute_command` applies a `MarkdownCommand` to any type implementing
//! `EditorDocument`, using the validated markers from the toolbar config.

use smol_str::SmolStr;

use crate::actions::{KeyCombo, KeybindingConfig, KeydownResult, MarkdownCommand};
use crate::config::CommandMarkers;
use crate::document::EditorDocument;
use crate::link::insert_reference;
use crate::toggle::{apply_marker_toggle, apply_ordered_list_toggle};
use crate::wrap::apply_wrapped_edit;

/// Execute a toolbar command on a document.
///
/// Returns true if the command changed the document.
pub fn execute_command<D: EditorDocument>(doc: &mut D, markers: &CommandMarkers, command: MarkdownCommand) -> bool {
    tracing::debug!(%command, "executing toolbar command");
    match command {
        MarkdownCommand::ToggleHeading1 => apply_marker_toggle(doc, &markers.headings[0]),
        MarkdownCommand::ToggleHeading2 => apply_marker_toggle(doc, &markers.headings[1]),
        MarkdownCommand::ToggleHeading3 => apply_marker_toggle(doc, &markers.headings[2]),
        MarkdownCommand::ToggleBold => apply_wrapped_edit(doc, &markers.bold, None, markers.wrap),
        MarkdownCommand::ToggleItalic => apply_wrapped_edit(doc, &markers.italic, None, markers.wrap),
        MarkdownCommand::ToggleUnorderedList => apply_marker_toggle(doc, &markers.bullet),
        MarkdownCommand::ToggleOrderedList => {
            let alternatives: Vec<&str> = markers
                .ordered_alternatives
                .iter()
                .map(SmolStr::as_str)
                .collect();
            apply_ordered_list_toggle(doc, &alternatives)
        }
        MarkdownCommand::InsertLink => execute_insert_reference(doc, false, &markers.link_placeholder),
        MarkdownCommand::InsertImage => execute_insert_reference(doc, true, &markers.image_placeholder),
    }
}

fn execute_insert_reference<D: EditorDocument>(doc: &mut D, is_image: bool, placeholder: &str) -> bool {
    let selected = doc.selected_text().unwrap_or_default();
    insert_reference(doc, &selected, is_image, placeholder)
}

/// Handle a keydown event using the keybinding configuration.
///
/// Bound combos run their command. Unbound navigation and modifier-only
/// keypresses pass through; anything else is left for the host.
pub fn handle_keydown_with_bindings<D: EditorDocument>(
    doc: &mut D,
    markers: &CommandMarkers,
    config: &KeybindingConfig,
    combo: &KeyCombo,
) -> KeydownResult {
    if let Some(command) = config.lookup(combo) {
        execute_command(doc, markers, command);
        return KeydownResult::Handled;
    }

    if combo.key.is_navigation() || combo.key.is_modifier() {
        return KeydownResult::PassThrough;
    }

    KeydownResult::NotHandled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Key;
    use crate::config::ToolbarConfig;
    use crate::types::TextRange;
    use crate::{EditorRope, PlainEditor, UndoableBuffer};

    type TestEditor = PlainEditor<UndoableBuffer<EditorRope>>;

    fn make_editor(content: &str) -> TestEditor {
        let rope = EditorRope::from_str(content);
        let buf = UndoableBuffer::new(rope, 100);
        PlainEditor::new(buf)
    }

    fn markers() -> CommandMarkers {
        ToolbarConfig::default().validate().unwrap()
    }

    #[test]
    fn test_headings() {
        let markers = markers();
        let mut editor = make_editor("Title");
        assert!(execute_command(&mut editor, &markers, MarkdownCommand::ToggleHeading2));
        assert_eq!(editor.content_string(), "## Title");
        assert!(execute_command(&mut editor, &markers, MarkdownCommand::ToggleHeading3));
        assert_eq!(editor.content_string(), "### Title");
        assert!(execute_command(&mut editor, &markers, MarkdownCommand::ToggleHeading3));
        assert_eq!(editor.content_string(), "Title");
    }

    #[test]
    fn test_bold_and_italic() {
        let markers = markers();
        let mut editor = make_editor("word");
        editor.set_selection(Some(TextRange::new(1, 1, 1, 5)));
        execute_command(&mut editor, &markers, MarkdownCommand::ToggleItalic);
        execute_command(&mut editor, &markers, MarkdownCommand::ToggleBold);
        assert_eq!(editor.content_string(), "***word***");

        execute_command(&mut editor, &markers, MarkdownCommand::ToggleBold);
        assert_eq!(editor.content_string(), "*word*");
    }

    #[test]
    fn test_lists() {
        let markers = markers();
        let mut editor = make_editor("a\nb");
        editor.set_selection(Some(TextRange::new(1, 1, 2, 2)));
        execute_command(&mut editor, &markers, MarkdownCommand::ToggleUnorderedList);
        assert_eq!(editor.content_string(), "- a\n- b");

        editor.set_selection(Some(TextRange::new(1, 1, 2, 4)));
        execute_command(&mut editor, &markers, MarkdownCommand::ToggleOrderedList);
        assert_eq!(editor.content_string(), "1. a\n2. b");

        editor.set_selection(Some(TextRange::new(1, 1, 2, 5)));
        execute_command(&mut editor, &markers, MarkdownCommand::ToggleUnorderedList);
        assert_eq!(editor.content_string(), "- a\n- b");
    }

    #[test]
    fn test_link_uses_selection() {
        let markers = markers();
        let mut editor = make_editor("click here");
        editor.set_selection(Some(TextRange::new(1, 7, 1, 11)));
        assert!(execute_command(&mut editor, &markers, MarkdownCommand::InsertLink));
        assert_eq!(editor.content_string(), "click [here]()");

        let mut editor = make_editor("");
        assert!(execute_command(&mut editor, &markers, MarkdownCommand::InsertImage));
        assert_eq!(editor.content_string(), "![alt text]()");
    }

    #[test]
    fn test_custom_markers() {
        let config = ToolbarConfig {
            bullet_marker: "*".into(),
            bold_marker: "__".into(),
            link_placeholder: "text".into(),
            ..Default::default()
        };
        let markers = config.validate().unwrap();

        let mut editor = make_editor("- item");
        execute_command(&mut editor, &markers, MarkdownCommand::ToggleUnorderedList);
        assert_eq!(editor.content_string(), "* - item");

        let mut editor = make_editor("");
        execute_command(&mut editor, &markers, MarkdownCommand::ToggleBold);
        assert_eq!(editor.content_string(), "____");

        let mut editor = make_editor("");
        execute_command(&mut editor, &markers, MarkdownCommand::InsertLink);
        assert_eq!(editor.content_string(), "[text]()");
    }

    #[test]
    fn test_keydown() {
        let markers = markers();
        let config = KeybindingConfig::default_for_platform(false);
        let mut editor = make_editor("word");
        editor.set_selection(Some(TextRange::new(1, 1, 1, 5)));

        let combo = KeyCombo::primary(Key::character("b"), false);
        let result = handle_keydown_with_bindings(&mut editor, &markers, &config, &combo);
        assert_eq!(result, KeydownResult::Handled);
        assert_eq!(editor.content_string(), "**word**");

        let combo = KeyCombo::new(Key::ArrowLeft);
        let result = handle_keydown_with_bindings(&mut editor, &markers, &config, &combo);
        assert_eq!(result, KeydownResult::PassThrough);

        let combo = KeyCombo::new(Key::Shift);
        let result = handle_keydown_with_bindings(&mut editor, &markers, &config, &combo);
        assert_eq!(result, KeydownResult::PassThrough);

        let combo = KeyCombo::new(Key::character("x"));
        let result = handle_keydown_with_bindings(&mut editor, &markers, &config, &combo);
        assert_eq!(result, KeydownResult::NotHandled);
        assert_eq!(editor.content_string(), "**word**");
    }
}
