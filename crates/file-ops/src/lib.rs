//! File operations for swapping game configuration presets.
//!
//! A preset is a folder of `.ini` files under a user-chosen root. Applying
//! one copies its `.ini` files into the game's private config directory
//! through the privileged shell, after making a one-time backup of the
//! game's original files. Listing and deleting presets happen directly on
//! the filesystem.

mod apply;
mod backup;
mod browse;
mod delete;
mod error;
mod ops;
mod paths;

pub use apply::ApplyOutcome;
pub use browse::{PresetFolder, backup_entry, list_presets};
pub use delete::delete_preset;
pub use error::FileOpsError;
pub use ops::ConfigOps;
pub use paths::{GamePaths, raw_path_from_reference, resolve_root};

/// Primary shared storage mount on Android.
pub const DEFAULT_STORAGE_ROOT: &str = "/storage/emulated/0";

/// Package of the global release of the game.
pub const DEFAULT_GAME_PACKAGE: &str = "com.kurogame.wutheringwaves.global";

/// Backup directory name, created directly under the storage root.
pub const BACKUP_DIR_NAME: &str = ".WuWa_Backup";

/// Folder name reserved under the preset root; never listed as a preset.
pub const RESERVED_BACKUP_NAME: &str = "backup";

/// The game's original files saved by the one-time backup.
pub const BACKUP_FILES: [&str; 3] = ["Engine.ini", "GameUserSettings.ini", "DeviceProfiles.ini"];

/// Pattern of the files copied out of a preset folder.
pub const INI_PATTERN: &str = "*.ini";
