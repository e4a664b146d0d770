//! Toolbar commands and keyboard input types.
//!
//! `MarkdownCommand` names the operations a toolbar exposes. `Key`,
//! `Modifiers` and `KeyCombo` are a platform-agnostic description of a
//! keypress; `KeybindingConfig` maps combos to commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, ToSmolStr};

use crate::error::{KeyComboError, UnknownCommand};

/// A formatting command offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkdownCommand {
    #[serde(rename = "toggle-heading-1")]
    ToggleHeading1,
    #[serde(rename = "toggle-heading-2")]
    ToggleHeading2,
    #[serde(rename = "toggle-heading-3")]
    ToggleHeading3,
    ToggleBold,
    ToggleItalic,
    ToggleUnorderedList,
    ToggleOrderedList,
    InsertLink,
    InsertImage,
}

impl MarkdownCommand {
    /// All commands, in toolbar order.
    pub const ALL: [Self; 9] = [
        Self::ToggleHeading1,
        Self::ToggleHeading2,
        Self::ToggleHeading3,
        Self::ToggleBold,
        Self::ToggleItalic,
        Self::ToggleUnorderedList,
        Self::ToggleOrderedList,
        Self::InsertLink,
        Self::InsertImage,
    ];

    /// Stable identifier, as used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::ToggleHeading1 => "toggle-heading-1",
            Self::ToggleHeading2 => "toggle-heading-2",
            Self::ToggleHeading3 => "toggle-heading-3",
            Self::ToggleBold => "toggle-bold",
            Self::ToggleItalic => "toggle-italic",
            Self::ToggleUnorderedList => "toggle-unordered-list",
            Self::ToggleOrderedList => "toggle-ordered-list",
            Self::InsertLink => "insert-link",
            Self::InsertImage => "insert-image",
        }
    }

    /// Button title.
    pub fn title(self) -> &'static str {
        match self {
            Self::ToggleHeading1 => "Heading 1",
            Self::ToggleHeading2 => "Heading 2",
            Self::ToggleHeading3 => "Heading 3",
            Self::ToggleBold => "Bold",
            Self::ToggleItalic => "Italic",
            Self::ToggleUnorderedList => "Unordered list",
            Self::ToggleOrderedList => "Ordered list",
            Self::InsertLink => "Insert link",
            Self::InsertImage => "Insert image",
        }
    }
}

impl fmt::Display for MarkdownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarkdownCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Key values for keyboard input.
///
/// Platform-agnostic key representation. Hosts convert from native key
/// events to this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Character(SmolStr),

    /// Unknown/unidentified key.
    Unidentified,

    // === Whitespace / editing ===
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,

    // === Navigation ===
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    // === Modifiers ===
    Alt,
    AltGraph,
    CapsLock,
    Control,
    Meta,
    Shift,
    Super,
}

impl Key {
    /// Create a character key. Letters are stored lowercase so that
    /// `Shift+K` and `Shift+k` name the same combo.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        let s = s.into();
        if s.chars().any(char::is_uppercase) {
            Self::Character(s.to_lowercase().to_smolstr())
        } else {
            Self::Character(s)
        }
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Alt
                | Self::AltGraph
                | Self::CapsLock
                | Self::Control
                | Self::Meta
                | Self::Shift
                | Self::Super
        )
    }

    /// Parse a key name as written in shortcut strings.
    fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(_), None) = (chars.next(), chars.next()) {
            return Some(Self::character(name));
        }
        let key = match name.to_ascii_lowercase().as_str() {
            "backspace" => Self::Backspace,
            "delete" | "del" => Self::Delete,
            "enter" | "return" => Self::Enter,
            "tab" => Self::Tab,
            "escape" | "esc" => Self::Escape,
            "space" => Self::Space,
            "left" | "arrowleft" => Self::ArrowLeft,
            "right" | "arrowright" => Self::ArrowRight,
            "up" | "arrowup" => Self::ArrowUp,
            "down" | "arrowdown" => Self::ArrowDown,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            _ => return None,
        };
        Some(key)
    }

    fn name(&self) -> &str {
        match self {
            Self::Character(c) => c.as_str(),
            Self::Unidentified => "unidentified",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::Enter => "enter",
            Self::Tab => "tab",
            Self::Escape => "escape",
            Self::Space => "space",
            Self::ArrowLeft => "left",
            Self::ArrowRight => "right",
            Self::ArrowUp => "up",
            Self::ArrowDown => "down",
            Self::Home => "home",
            Self::End => "end",
            Self::PageUp => "pageup",
            Self::PageDown => "pagedown",
            Self::Alt => "alt",
            Self::AltGraph => "altgraph",
            Self::CapsLock => "capslock",
            Self::Control => "control",
            Self::Meta => "meta",
            Self::Shift => "shift",
            Self::Super => "super",
        }
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Get the primary modifier for the platform (Cmd on Mac, Ctrl elsewhere).
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }

    /// Add Shift.
    pub fn shift(self) -> Self {
        Self {
            shift: true,
            ..self
        }
    }

    /// Add Alt.
    pub fn alt(self) -> Self {
        Self { alt: true, ..self }
    }
}

/// A key combination for triggering a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self::with_modifiers(key, Modifiers::primary(is_mac))
    }

    pub fn primary_shift(key: Key, is_mac: bool) -> Self {
        Self::with_modifiers(key, Modifiers::primary(is_mac).shift())
    }

    pub fn primary_alt(key: Key, is_mac: bool) -> Self {
        Self::with_modifiers(key, Modifiers::primary(is_mac).alt())
    }
}

impl FromStr for KeyCombo {
    type Err = KeyComboError;

    /// Parse `"ctrl+shift+8"`-style strings. Modifier names are
    /// case-insensitive; `ctrl++` binds the plus key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyComboError::Empty);
        }

        let (modifier_part, key_part) = if s == "+" {
            ("", "+")
        } else if let Some(mods) = s.strip_suffix("++") {
            (mods, "+")
        } else {
            s.rsplit_once('+').unwrap_or(("", s))
        };

        let mut modifiers = Modifiers::NONE;
        for name in modifier_part.split('+').map(str::trim).filter(|n| !n.is_empty()) {
            match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" | "opt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "command" | "super" | "win" => modifiers.meta = true,
                _ => return Err(KeyComboError::UnknownModifier(name.to_string())),
            }
        }

        let key_part = key_part.trim();
        let key = Key::from_name(key_part).ok_or_else(|| KeyComboError::UnknownKey(key_part.to_string()))?;
        Ok(Self { key, modifiers })
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            ctrl,
            alt,
            shift,
            meta,
        } = self.modifiers;
        for (held, name) in [(ctrl, "ctrl"), (alt, "alt"), (shift, "shift"), (meta, "cmd")] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(self.key.name())
    }
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled,
    /// Event was not a keybinding, let platform handle it.
    NotHandled,
    /// Event should be passed through (navigation, etc.).
    PassThrough,
}

/// Mapping from key combinations to toolbar commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingConfig {
    bindings: Vec<(KeyCombo, MarkdownCommand)>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::default_for_platform(false)
    }
}

impl KeybindingConfig {
    /// A config with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Standard shortcuts, using Cmd on Mac and Ctrl elsewhere.
    pub fn default_for_platform(is_mac: bool) -> Self {
        let ch = Key::character;
        let mut config = Self::empty();
        config.bind(KeyCombo::primary(ch("b"), is_mac), MarkdownCommand::ToggleBold);
        config.bind(KeyCombo::primary(ch("i"), is_mac), MarkdownCommand::ToggleItalic);
        config.bind(KeyCombo::primary(ch("k"), is_mac), MarkdownCommand::InsertLink);
        config.bind(KeyCombo::primary_shift(ch("k"), is_mac), MarkdownCommand::InsertImage);
        config.bind(KeyCombo::primary_alt(ch("1"), is_mac), MarkdownCommand::ToggleHeading1);
        config.bind(KeyCombo::primary_alt(ch("2"), is_mac), MarkdownCommand::ToggleHeading2);
        config.bind(KeyCombo::primary_alt(ch("3"), is_mac), MarkdownCommand::ToggleHeading3);
        config.bind(
            KeyCombo::primary_shift(ch("7"), is_mac),
            MarkdownCommand::ToggleOrderedList,
        );
        config.bind(
            KeyCombo::primary_shift(ch("8"), is_mac),
            MarkdownCommand::ToggleUnorderedList,
        );
        config
    }

    /// Bind `combo` to `command`, replacing any existing binding for `combo`.
    pub fn bind(&mut self, combo: KeyCombo, command: MarkdownCommand) {
        match self.bindings.iter_mut().find(|(bound, _)| *bound == combo) {
            Some(binding) => binding.1 = command,
            None => self.bindings.push((combo, command)),
        }
    }

    /// Remove the binding for `combo`.
    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<MarkdownCommand> {
        let idx = self.bindings.iter().position(|(bound, _)| bound == combo)?;
        Some(self.bindings.remove(idx).1)
    }

    /// Look up the command bound to `combo`.
    pub fn lookup(&self, combo: &KeyCombo) -> Option<MarkdownCommand> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == combo)
            .map(|(_, command)| *command)
    }

    /// First combo bound to `command`.
    pub fn shortcut_for(&self, command: MarkdownCommand) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == command)
            .map(|(combo, _)| combo)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyCombo, MarkdownCommand)> + '_ {
        self.bindings.iter().map(|(combo, command)| (combo, *command))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
