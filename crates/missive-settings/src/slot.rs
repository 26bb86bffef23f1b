//! The on-disk settings slot.
//!
//! A single JSON file holding the theme and the local user's profile.
//! Missing file means defaults; a corrupt file is surfaced as an error so
//! the caller can decide whether to reset it.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use missive_store::User;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SettingsError};
use crate::theme::Theme;

/// Everything that survives the process: one blob, one key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    pub theme: Theme,
    pub profile: User,
}

/// Handle on the settings file.
pub struct SettingsSlot {
    path: PathBuf,
}

impl SettingsSlot {
    /// Use the default platform location:
    /// - Linux:   `~/.local/share/missive/settings.json`
    /// - macOS:   `~/Library/Application Support/com.missive.missive/settings.json`
    /// - Windows: `{FOLDERID_RoamingAppData}\missive\missive\data\settings.json`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "missive", "missive").ok_or(SettingsError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(Self::open_at(&data_dir.join("settings.json")))
    }

    /// Use an explicit path. Useful for tests and custom layouts.
    pub fn open_at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Filesystem path of the slot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the blob. An absent file yields `Settings::default()`.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let json = std::fs::read_to_string(&self.path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings)
    }

    /// Validate and write the blob. All-or-nothing: an invalid theme never
    /// reaches disk.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.theme.validate()?;
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
