//! The visual theme as a closed, validated struct.
//!
//! The field set is enumerated and `deny_unknown_fields` rejects anything
//! else at the serde boundary; there is no dynamic merge of arbitrary
//! theme keys.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the OS preference.
    Auto,
    Custom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderRadius {
    Sharp,
    Rounded,
    Pill,
}

/// Theme settings persisted alongside the profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Accent colours as `#rrggbb` hex strings.
    pub primary_color: String,
    pub accent_color: String,
    pub font_size: FontSize,
    pub border_radius: BorderRadius,
    pub animations: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Dark,
            primary_color: "#2196f3".to_string(),
            accent_color: "#4caf50".to_string(),
            font_size: FontSize::Medium,
            border_radius: BorderRadius::Rounded,
            animations: true,
        }
    }
}

impl Theme {
    /// Check the free-form fields. The enums are closed by construction;
    /// only the colour strings need a shape check.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("primaryColor", &self.primary_color),
            ("accentColor", &self.accent_color),
        ] {
            if !is_hex_color(value) {
                return Err(SettingsError::InvalidTheme(format!(
                    "{name} must be a #rrggbb colour, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// `#rrggbb`, lowercase or uppercase digits.
fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}
