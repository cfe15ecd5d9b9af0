//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use wuwatool_shell::BridgeKind;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/wuwatool/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preferences file (default: ~/.config/wuwatool/prefs.json).
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    /// Bridge for privileged commands, overriding the config (rish, su, local).
    #[arg(long, global = true)]
    pub bridge: Option<BridgeKind>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show bridge permission, selected folder and backup state.
    Status,

    /// List the presets in the selected folder.
    List {
        /// Keep listing until Ctrl-C, printing whenever the folder changes.
        #[arg(long)]
        watch: bool,
    },

    /// Apply a preset, backing up the game's original files first.
    Apply {
        /// Preset folder name.
        name: String,
    },

    /// Copy the backed-up original files back into the game.
    Restore,

    /// Delete a preset folder.
    Delete {
        /// Preset folder name.
        name: String,

        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Select the folder presets are stored in (tree URI, document ID or path).
    Select {
        reference: String,
    },

    /// Show or change preferences.
    Settings {
        /// Theme preference.
        #[arg(long, value_enum)]
        theme: Option<ThemeChoice>,

        /// Allow deleting presets.
        #[arg(long)]
        show_delete: Option<bool>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
    System,
}

impl ThemeChoice {
    /// Maps to the stored preference value.
    pub fn as_pref(&self) -> Option<bool> {
        match self {
            ThemeChoice::Dark => Some(true),
            ThemeChoice::Light => Some(false),
            ThemeChoice::System => None,
        }
    }
}
