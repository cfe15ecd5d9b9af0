//! Tool configuration.
//!
//! Stored as TOML at `~/.config/wuwatool/config.toml`. Everything here is
//! environment (which bridge, where the game lives); user choices made
//! while using the tool live in the preferences file instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wuwatool_file_ops::{DEFAULT_GAME_PACKAGE, DEFAULT_STORAGE_ROOT, GamePaths};
use wuwatool_shell::{BridgeKind, CommandBridge, PrivilegeBridge};

/// Tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Bridge used for privileged commands.
    #[serde(default)]
    pub bridge: BridgeKind,

    /// Explicit path to the bridge program (e.g. `/data/local/tmp/rish`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_program: Option<String>,

    /// Shared storage mount that folder references are relative to.
    #[serde(default = "default_storage_root")]
    pub storage_root: String,

    /// Package name of the game.
    #[serde(default = "default_game_package")]
    pub game_package: String,

    /// Overrides the derived live config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_config_path: Option<String>,

    /// Overrides the derived backup directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,

    /// Seconds between preset list refreshes in watch mode.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_storage_root() -> String {
    DEFAULT_STORAGE_ROOT.into()
}

fn default_game_package() -> String {
    DEFAULT_GAME_PACKAGE.into()
}

fn default_refresh_interval() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bridge: BridgeKind::default(),
            bridge_program: None,
            storage_root: default_storage_root(),
            game_package: default_game_package(),
            game_config_path: None,
            backup_path: None,
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location, creating it if missing.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Loads configuration from `path`, creating a default file if missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Writes the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Directory layout derived from the storage root, package and overrides.
    pub fn game_paths(&self) -> GamePaths {
        GamePaths::new(&self.storage_root, &self.game_package).with_overrides(
            self.game_config_path.as_ref().map(PathBuf::from),
            self.backup_path.as_ref().map(PathBuf::from),
        )
    }

    /// Builds the configured privilege bridge.
    pub fn privilege_bridge(&self) -> Arc<dyn PrivilegeBridge> {
        match &self.bridge_program {
            Some(program) => Arc::new(CommandBridge::with_program(self.bridge, program.clone())),
            None => Arc::new(CommandBridge::new(self.bridge)),
        }
    }
}

/// Returns the default configuration file path.
pub fn config_path() -> PathBuf {
    wuwatool_settings::config_dir().join("config.toml")
}
