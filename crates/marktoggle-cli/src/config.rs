//! KDL config file loading.
//!
//! ```kdl
//! bold "__"
//! italic "_"
//! bullet "*"
//! heading "#"
//! link-placeholder "text"
//! image-placeholder "description"
//! inner-toggle false
//! bind "ctrl+h" "toggle-heading-2"
//! unbind "ctrl+k"
//! ```

use std::path::Path;

use kdl::{KdlDocument, KdlNode};
use marktoggle_core::{KeyCombo, KeybindingConfig, MarkdownCommand, ToolbarConfig};
use miette::{IntoDiagnostic, Result, WrapErr};

/// Settings read from a config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliConfig {
    pub toolbar: ToolbarConfig,
    bind: Vec<(KeyCombo, MarkdownCommand)>,
    unbind: Vec<KeyCombo>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).wrap_err_with(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let doc: KdlDocument = text.parse().into_diagnostic()?;
        let mut config = Self::default();

        for node in doc.nodes() {
            let name = node.name().value();
            tracing::trace!(name, "config node");
            match name {
                "bold" => config.toolbar.bold_marker = string_arg(node, 0)?.to_string(),
                "italic" => config.toolbar.italic_marker = string_arg(node, 0)?.to_string(),
                "bullet" => config.toolbar.bullet_marker = string_arg(node, 0)?.to_string(),
                "heading" => {
                    let marker = string_arg(node, 0)?;
                    let mut chars = marker.chars();
                    config.toolbar.heading_marker = match (chars.next(), chars.next()) {
                        (Some(c), None) => c,
                        _ => miette::bail!("heading marker must be a single character, got {marker:?}"),
                    };
                }
                "link-placeholder" => {
                    config.toolbar.link_placeholder = string_arg(node, 0)?.to_string()
                }
                "image-placeholder" => {
                    config.toolbar.image_placeholder = string_arg(node, 0)?.to_string()
                }
                "inner-toggle" => config.toolbar.inner_toggle = bool_arg(node, 0)?,
                "bind" => {
                    let combo: KeyCombo = string_arg(node, 0)?.parse().into_diagnostic()?;
                    let command: MarkdownCommand = string_arg(node, 1)?.parse().into_diagnostic()?;
                    config.bind.push((combo, command));
                }
                "unbind" => {
                    let combo: KeyCombo = string_arg(node, 0)?.parse().into_diagnostic()?;
                    config.unbind.push(combo);
                }
                other => tracing::warn!(node = other, "ignoring unknown config node"),
            }
        }

        Ok(config)
    }

    /// Platform default bindings with this config's changes applied.
    pub fn keybindings(&self, is_mac: bool) -> KeybindingConfig {
        let mut keybindings = KeybindingConfig::default_for_platform(is_mac);
        for combo in &self.unbind {
            keybindings.unbind(combo);
        }
        for (combo, command) in &self.bind {
            keybindings.bind(combo.clone(), *command);
        }
        keybindings
    }
}

fn string_arg(node: &KdlNode, index: usize) -> Result<&str> {
    node.entries()
        .iter()
        .filter(|entry| entry.name().is_none())
        .nth(index)
        .and_then(|entry| entry.value().as_string())
        .ok_or_else(|| {
            miette::miette!(
                "`{}` expects a string as argument {}",
                node.name().value(),
                index + 1
            )
        })
}

fn bool_arg(node: &KdlNode, index: usize) -> Result<bool> {
    node.entries()
        .iter()
        .filter(|entry| entry.name().is_none())
        .nth(index)
        .and_then(|entry| entry.value().as_bool())
        .ok_or_else(|| {
            miette::miette!(
                "`{}` expects a boolean as argument {}",
                node.name().value(),
                index + 1
            )
        })
}
