//! Toolbar configuration.
//!
//! `ToolbarConfig` is the user-facing, serializable form. Validating it
//! produces `CommandMarkers`, the precompiled marker tables the commands run
//! against.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{ConfigError, MarkerError};
use crate::link::{IMAGE_PLACEHOLDER, LINK_PLACEHOLDER};
use crate::marker::MarkerSet;
use crate::wrap::WrapOptions;

/// Ordered numbering the bullet toggle recognises and replaces.
const ORDERED_ALTERNATIVE: &str = "1.";

/// User-facing toolbar settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ToolbarConfig {
    /// Character repeated once, twice or three times for heading levels.
    pub heading_marker: char,
    /// Unordered list marker.
    pub bullet_marker: String,
    pub bold_marker: String,
    pub italic_marker: String,
    /// Link text inserted when nothing is selected.
    pub link_placeholder: String,
    /// Image alt text inserted when nothing is selected.
    pub image_placeholder: String,
    /// Unwrap bold/italic when the selection sits just inside the markers.
    pub inner_toggle: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            heading_marker: '#',
            bullet_marker: "-".into(),
            bold_marker: "**".into(),
            italic_marker: "*".into(),
            link_placeholder: LINK_PLACEHOLDER.into(),
            image_placeholder: IMAGE_PLACEHOLDER.into(),
            inner_toggle: true,
        }
    }
}

impl ToolbarConfig {
    /// Check the config and build the marker tables for the commands.
    pub fn validate(&self) -> Result<CommandMarkers, ConfigError> {
        if self.heading_marker.is_whitespace() || self.heading_marker.is_control() {
            return Err(ConfigError::InvisibleHeadingMarker(self.heading_marker));
        }
        let bold = wrap_marker("bold", &self.bold_marker)?;
        let italic = wrap_marker("italic", &self.italic_marker)?;

        let level = |n: usize| self.heading_marker.to_string().repeat(n);
        let (h1, h2, h3) = (level(1), level(2), level(3));
        let heading_err = |source: MarkerError| ConfigError::Marker {
            field: "heading",
            source,
        };
        let headings = [
            MarkerSet::with_target(&h1, &[&h2, &h3]).map_err(heading_err)?,
            MarkerSet::with_target(&h2, &[&h1, &h3]).map_err(heading_err)?,
            MarkerSet::with_target(&h3, &[&h1, &h2]).map_err(heading_err)?,
        ];

        let bullet = MarkerSet::with_target(&self.bullet_marker, &[ORDERED_ALTERNATIVE]).map_err(
            |source| ConfigError::Marker {
                field: "bullet",
                source,
            },
        )?;
        let ordered_alternatives = bullet.target().map(SmolStr::from).into_iter().collect();

        Ok(CommandMarkers {
            headings,
            bullet,
            ordered_alternatives,
            bold,
            italic,
            link_placeholder: self.link_placeholder.as_str().into(),
            image_placeholder: self.image_placeholder.as_str().into(),
            wrap: WrapOptions {
                allow_inner_toggle: self.inner_toggle,
            },
        })
    }
}

fn wrap_marker(field: &'static str, marker: &str) -> Result<SmolStr, ConfigError> {
    if marker.is_empty() {
        return Err(ConfigError::EmptyWrapMarker { field });
    }
    if marker.contains(['\n', '\r']) {
        return Err(ConfigError::MultilineWrapMarker { field });
    }
    Ok(marker.into())
}

/// Validated markers for every toolbar command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMarkers {
    /// Marker sets for heading levels 1-3, each with its own level first.
    pub headings: [MarkerSet; 3],
    /// Unordered list marker, with ordered numbering as an alternative.
    pub bullet: MarkerSet,
    /// Markers the ordered-list toggle replaces.
    pub ordered_alternatives: Vec<SmolStr>,
    pub bold: SmolStr,
    pub italic: SmolStr,
    pub link_placeholder: SmolStr,
    pub image_placeholder: SmolStr,
    pub wrap: WrapOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let markers = ToolbarConfig::default().validate().unwrap();
        let heading_sets: Vec<Vec<&str>> = markers
            .headings
            .iter()
            .map(|set| set.markers().collect())
            .collect();
        assert_eq!(
            heading_sets,
            vec![
                vec!["#", "##", "###"],
                vec!["##", "#", "###"],
                vec!["###", "#", "##"],
            ]
        );
        assert_eq!(markers.bullet.markers().collect::<Vec<_>>(), vec!["-", "1."]);
        assert_eq!(markers.ordered_alternatives, vec![SmolStr::from("-")]);
        assert_eq!(markers.bold, "**");
        assert_eq!(markers.italic, "*");
        assert!(markers.wrap.allow_inner_toggle);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ToolbarConfig =
            serde_json::from_str(r#"{ "bullet-marker": "*", "inner-toggle": false }"#).unwrap();
        assert_eq!(config.bullet_marker, "*");
        assert!(!config.inner_toggle);
        assert_eq!(config.bold_marker, "**");
        assert_eq!(config.heading_marker, '#');

        let markers = config.validate().unwrap();
        assert_eq!(markers.bullet.target(), Some("*"));
        assert!(!markers.wrap.allow_inner_toggle);
    }

    #[test]
    fn test_config_json_shape() {
        let json = serde_json::to_string_pretty(&ToolbarConfig::default()).unwrap();
        insta::assert_snapshot!(json, @r##"
        {
          "heading-marker": "#",
          "bullet-marker": "-",
          "bold-marker": "**",
          "italic-marker": "*",
          "link-placeholder": "link text",
          "image-placeholder": "alt text",
          "inner-toggle": true
        }
        "##);
    }

    #[test]
    fn test_invalid_configs() {
        let config = ToolbarConfig {
            bullet_marker: "- [ ]".into(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Marker {
                field: "bullet",
                source: MarkerError::ContainsWhitespace("- [ ]".into()),
            })
        );

        let config = ToolbarConfig {
            bullet_marker: "1.".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Marker { field: "bullet", .. })
        ));

        let config = ToolbarConfig {
            bold_marker: String::new(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyWrapMarker { field: "bold" })
        );

        let config = ToolbarConfig {
            italic_marker: "_\n".into(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MultilineWrapMarker { field: "italic" })
        );

        let config = ToolbarConfig {
            heading_marker: ' ',
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvisibleHeadingMarker(' '))
        );
    }

    #[test]
    fn test_custom_heading_marker() {
        let config = ToolbarConfig {
            heading_marker: '=',
            ..Default::default()
        };
        let markers = config.validate().unwrap();
        assert_eq!(markers.headings[1].target(), Some("=="));
    }
}
