//! Copying preset `.ini` files into the game's config directory.

use std::path::Path;

use crate::INI_PATTERN;
use crate::ops::{ConfigOps, q, q_dir};

/// Result of applying a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The preset's files were copied into place.
    Applied,
    /// The one-time backup could not be made, so nothing was copied.
    BackupFailed,
    /// The backup is in place but the copy command failed.
    CopyFailed,
}

impl ConfigOps {
    /// Copies every `*.ini` under `source` (recursively) into the config dir.
    ///
    /// The config dir is created first if missing. Files are flattened into
    /// the destination and overwrite what is there; other files are left
    /// alone. Returns the status of the `find` batch, so a source without
    /// any `.ini` files still succeeds.
    pub async fn apply_config(&self, source: &Path) -> bool {
        let dest = &self.paths.config_dir;

        if !self.dir_exists(dest).await && !self.make_dir(dest).await {
            tracing::warn!(path = %dest.display(), "failed to create config directory");
            return false;
        }

        let cmd = format!(
            "find {} -name {} -exec cp -f {{}} {} \\;",
            q(source),
            wuwatool_shell::quote(INI_PATTERN),
            q_dir(dest)
        );
        let ok = self.shell.exec(&cmd).await;

        if ok {
            tracing::info!(source = %source.display(), dest = %dest.display(), "config applied");
        } else {
            tracing::warn!(source = %source.display(), "config copy failed");
        }
        ok
    }

    /// Copies the backed-up original files back into the config dir.
    ///
    /// Fails when there is no backup to restore from.
    pub async fn restore_backup(&self) -> bool {
        let backup = self.paths.backup_dir.clone();
        self.apply_config(&backup).await
    }

    /// Applies the preset folder `root/name`, backing up the originals first.
    pub async fn apply_preset(&self, root: &Path, name: &str) -> ApplyOutcome {
        let source = root.join(name);

        if !self.ensure_backup_exists().await {
            return ApplyOutcome::BackupFailed;
        }

        if self.apply_config(&source).await {
            ApplyOutcome::Applied
        } else {
            ApplyOutcome::CopyFailed
        }
    }
}
