//! Preset discovery under the selected root.

use std::path::{Path, PathBuf};

use crate::{FileOpsError, RESERVED_BACKUP_NAME};

/// A preset folder (or the backup pseudo-preset).
#[derive(Debug, Clone, PartialEq)]
pub struct PresetFolder {
    /// Folder name, shown to the user.
    pub name: String,
    /// Full absolute path.
    pub path: PathBuf,
    /// Whether this entry is the backup of the game's original files.
    pub is_backup: bool,
}

/// Lists the preset folders directly under `root`.
///
/// Only directories count. Hidden ones (starting with `.`) and the
/// reserved `backup` folder are skipped. Sorted case-insensitively.
pub fn list_presets(root: &Path) -> Result<Vec<PresetFolder>, FileOpsError> {
    if !root.is_dir() {
        return Err(FileOpsError::NotADirectory(root.to_path_buf()));
    }

    let entries = std::fs::read_dir(root).map_err(|e| FileOpsError::io(root, e))?;

    let mut presets: Vec<PresetFolder> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            if !entry.file_type().ok()?.is_dir() {
                return None;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') || name == RESERVED_BACKUP_NAME {
                return None;
            }
            Some(PresetFolder {
                path: entry.path(),
                name,
                is_backup: false,
            })
        })
        .collect();

    presets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    tracing::debug!(root = %root.display(), count = presets.len(), "listed presets");
    Ok(presets)
}

/// Builds the entry that restores the backed-up original files.
pub fn backup_entry(backup_dir: &Path) -> PresetFolder {
    PresetFolder {
        name: RESERVED_BACKUP_NAME.to_string(),
        path: backup_dir.to_path_buf(),
        is_backup: true,
    }
}
