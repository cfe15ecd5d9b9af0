//! Persisted preferences.
//!
//! Stored as JSON at `~/.config/wuwatool/prefs.json`. Keys are snake_case;
//! the disclaimer flag is versioned (`disclaimer_shown_v1`) so a new
//! disclaimer text can be shown again.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{APP_DIR_NAME, SettingsError};

/// User preferences that survive restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Dark theme; `None` follows the system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_theme: Option<bool>,

    /// Whether presets can be deleted.
    #[serde(default = "default_true")]
    pub show_delete: bool,

    /// The selected preset root, as the user gave it (tree URI or path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_uri: Option<String>,

    /// Whether the first-run disclaimer was acknowledged.
    #[serde(rename = "disclaimer_shown_v1", default)]
    pub disclaimer_shown: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_theme: None,
            show_delete: default_true(),
            saved_uri: None,
            disclaimer_shown: false,
        }
    }
}

/// Preferences bound to their file; every setter writes through.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    prefs: Preferences,
    file_path: PathBuf,
}

impl PreferenceStore {
    /// Loads preferences from the default location.
    pub fn load_default() -> Result<Self, SettingsError> {
        Self::load(config_dir().join("prefs.json"))
    }

    /// Loads preferences from `file_path`.
    ///
    /// A missing file yields defaults. An unreadable or corrupt file is
    /// logged and also yields defaults, so a bad prefs file never blocks
    /// startup.
    pub fn load(file_path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let file_path = file_path.into();

        let prefs = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path).map_err(|e| SettingsError::Io {
                path: file_path.clone(),
                source: e,
            })?;
            match serde_json::from_str::<Preferences>(&content) {
                Ok(prefs) => prefs,
                Err(e) => {
                    tracing::warn!(
                        path = %file_path.display(),
                        error = %e,
                        "failed to parse preferences, using defaults"
                    );
                    Preferences::default()
                }
            }
        } else {
            Preferences::default()
        };

        Ok(Self { prefs, file_path })
    }

    /// Current values.
    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn set_dark_theme(&mut self, dark: Option<bool>) -> Result<(), SettingsError> {
        self.prefs.dark_theme = dark;
        self.save()
    }

    pub fn set_show_delete(&mut self, show: bool) -> Result<(), SettingsError> {
        self.prefs.show_delete = show;
        self.save()
    }

    /// Replaces the selected root wholesale.
    pub fn set_saved_uri(&mut self, reference: impl Into<String>) -> Result<(), SettingsError> {
        self.prefs.saved_uri = Some(reference.into());
        self.save()
    }

    pub fn mark_disclaimer_shown(&mut self) -> Result<(), SettingsError> {
        self.prefs.disclaimer_shown = true;
        self.save()
    }

    /// Writes the preferences to disk.
    pub fn save(&self) -> Result<(), SettingsError> {
        let io_err = |e| SettingsError::Io {
            path: self.file_path.clone(),
            source: e,
        };

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.prefs)?;
        std::fs::write(&self.file_path, json).map_err(io_err)?;

        tracing::debug!(path = %self.file_path.display(), "preferences saved");
        Ok(())
    }
}

/// Returns the platform-specific config directory for this tool.
pub fn config_dir() -> PathBuf {
    config_base_dir().join(APP_DIR_NAME)
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg.is_empty() {
                return PathBuf::from(xdg);
            }
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }
}
