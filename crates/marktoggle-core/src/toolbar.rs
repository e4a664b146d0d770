//! Toolbar binding.
//!
//! A `Toolbar` connects the markdown commands to one document at a time. The
//! owning view creates it, binds its document for as long as it holds the
//! borrow, and drops or unbinds it when the view goes away. Every command on
//! an unbound toolbar is a no-op.

use crate::actions::{KeyCombo, KeybindingConfig, KeydownResult, MarkdownCommand};
use crate::config::CommandMarkers;
use crate::document::EditorDocument;
use crate::execute::{execute_command, handle_keydown_with_bindings};

/// Markdown commands bound to a borrowed document.
pub struct Toolbar<'d, D: EditorDocument> {
    document: Option<&'d mut D>,
    markers: CommandMarkers,
    keybindings: KeybindingConfig,
}

impl<'d, D: EditorDocument> Toolbar<'d, D> {
    /// An unbound toolbar with the default keybindings.
    pub fn new(markers: CommandMarkers) -> Self {
        Self {
            document: None,
            markers,
            keybindings: KeybindingConfig::default(),
        }
    }

    /// A toolbar bound to `document`.
    pub fn bound(document: &'d mut D, markers: CommandMarkers) -> Self {
        let mut toolbar = Self::new(markers);
        toolbar.bind(document);
        toolbar
    }

    pub fn with_keybindings(mut self, keybindings: KeybindingConfig) -> Self {
        self.keybindings = keybindings;
        self
    }

    /// Bind `document`, replacing any previously bound one.
    pub fn bind(&mut self, document: &'d mut D) {
        if self.document.is_some() {
            tracing::debug!("rebinding toolbar to a new document");
        }
        self.document = Some(document);
    }

    /// Release the bound document, handing the borrow back.
    pub fn unbind(&mut self) -> Option<&'d mut D> {
        self.document.take()
    }

    pub fn is_bound(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&D> {
        self.document.as_deref()
    }

    pub fn markers(&self) -> &CommandMarkers {
        &self.markers
    }

    pub fn keybindings(&self) -> &KeybindingConfig {
        &self.keybindings
    }

    /// Whether the bound document has a non-empty selection. Hosts use this
    /// to enable selection-dependent buttons.
    pub fn has_selection(&self) -> bool {
        self.document().is_some_and(|doc| doc.has_selection())
    }

    /// Run `command` on the bound document.
    pub fn invoke(&mut self, command: MarkdownCommand) -> bool {
        let Some(doc) = self.document.as_deref_mut() else {
            tracing::debug!(%command, "toolbar has no document");
            return false;
        };
        execute_command(doc, &self.markers, command)
    }

    /// Route a keypress through the keybindings.
    pub fn handle_key(&mut self, combo: &KeyCombo) -> KeydownResult {
        let Some(doc) = self.document.as_deref_mut() else {
            return KeydownResult::NotHandled;
        };
        handle_keydown_with_bindings(doc, &self.markers, &self.keybindings, combo)
    }

    pub fn toggle_heading1(&mut self) -> bool {
        self.invoke(MarkdownCommand::ToggleHeading1)
    }

    pub fn toggle_heading2(&mut self) -> bool {
        self.invoke(MarkdownCommand::ToggleHeading2)
    }

    pub fn toggle_heading3(&mut self) -> bool {
        self.invoke(MarkdownCommand::ToggleHeading3)
    }

    pub fn toggle_bold(&mut self) -> bool {
        self.invoke(MarkdownCommand::ToggleBold)
    }

    pub fn toggle_italic(&mut self) -> bool {
        self.invoke(MarkdownCommand::ToggleItalic)
    }

    pub fn toggle_unordered_list(&mut self) -> bool {
        self.invoke(MarkdownCommand::ToggleUnorderedList)
    }

    pub fn toggle_ordered_list(&mut self) -> bool {
        self.invoke(MarkdownCommand::ToggleOrderedList)
    }

    pub fn insert_link(&mut self) -> bool {
        self.invoke(MarkdownCommand::InsertLink)
    }

    pub fn insert_image(&mut self) -> bool {
        self.invoke(MarkdownCommand::InsertImage)
    }
}
