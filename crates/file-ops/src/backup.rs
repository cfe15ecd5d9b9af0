//! One-time backup of the game's original config files.

use crate::BACKUP_FILES;
use crate::ops::{ConfigOps, q, q_dir};

impl ConfigOps {
    /// Makes sure the backup set exists, creating it on first use.
    ///
    /// An existing backup directory short-circuits to success and is never
    /// refreshed. Otherwise the directory is created and each of
    /// [`BACKUP_FILES`] is copied in with its own command, so a failure on
    /// any file is seen. A failed backup is removed again so the next call
    /// retries instead of trusting an incomplete set.
    pub async fn ensure_backup_exists(&self) -> bool {
        let backup = &self.paths.backup_dir;

        if self.dir_exists(backup).await {
            tracing::debug!(path = %backup.display(), "backup already present");
            return true;
        }

        if !self.make_dir(backup).await {
            tracing::warn!(path = %backup.display(), "failed to create backup directory");
            return false;
        }

        let dest = q_dir(backup);
        for name in BACKUP_FILES {
            let source = self.paths.config_dir.join(name);
            if !self.shell.exec(&format!("cp -f {} {dest}", q(&source))).await {
                tracing::warn!(file = name, source = %source.display(), "failed to back up config file");
                self.discard_backup().await;
                return false;
            }
        }

        tracing::info!(path = %backup.display(), files = BACKUP_FILES.len(), "backup created");
        true
    }

    /// Returns whether the backup directory exists.
    pub async fn backup_exists(&self) -> bool {
        self.dir_exists(&self.paths.backup_dir).await
    }

    async fn discard_backup(&self) {
        let backup = &self.paths.backup_dir;
        if !self.shell.exec(&format!("rm -rf {}", q(backup))).await {
            tracing::warn!(path = %backup.display(), "failed to remove incomplete backup");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::testing::{local_ops, recording_ops, seed_game_config};
    use crate::BACKUP_FILES;

    #[tokio::test]
    async fn creates_backup_of_all_three_files() {
        let tmp = tempfile::tempdir().unwrap();
        let ops = local_ops(tmp.path());
        seed_game_config(ops.paths());

        assert!(ops.ensure_backup_exists().await);

        for name in BACKUP_FILES {
            let saved = std::fs::read_to_string(ops.paths().backup_dir.join(name)).unwrap();
            assert_eq!(saved, format!("original {name}"));
        }
    }

    #[tokio::test]
    async fn second_call_does_not_copy_again() {
        let tmp = tempfile::tempdir().unwrap();
        let (ops, bridge) = recording_ops(tmp.path());
        seed_game_config(ops.paths());

        assert!(ops.ensure_backup_exists().await);
        // Live config changes after the first backup must not leak into it.
        std::fs::write(ops.paths().config_dir.join("Engine.ini"), "modified").unwrap();
        assert!(ops.ensure_backup_exists().await);

        assert_eq!(bridge.count_containing("cp -f"), 3);
        assert_eq!(bridge.count_containing("mkdir -p"), 1);
        let saved = std::fs::read_to_string(ops.paths().backup_dir.join("Engine.ini")).unwrap();
        assert_eq!(saved, "original Engine.ini");
    }

    #[tokio::test]
    async fn existing_backup_dir_short_circuits() {
        let tmp = tempfile::tempdir().unwrap();
        let (ops, bridge) = recording_ops(tmp.path());
        std::fs::create_dir_all(&ops.paths().backup_dir).unwrap();

        assert!(ops.ensure_backup_exists().await);
        assert_eq!(bridge.count_containing("cp -f"), 0);
        assert!(ops.backup_exists().await);
    }

    #[tokio::test]
    async fn missing_original_fails_and_leaves_no_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let (ops, bridge) = recording_ops(tmp.path());
        seed_game_config(ops.paths());
        std::fs::remove_file(ops.paths().config_dir.join("GameUserSettings.ini")).unwrap();

        assert!(!ops.ensure_backup_exists().await);
        assert!(!ops.paths().backup_dir.exists());
        assert!(!ops.backup_exists().await);

        // The next attempt starts over once the file is back.
        seed_game_config(ops.paths());
        assert!(ops.ensure_backup_exists().await);
        assert_eq!(bridge.count_containing("mkdir -p"), 2);
    }

    #[tokio::test]
    async fn no_game_config_at_all_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let ops = local_ops(tmp.path());

        assert!(!ops.ensure_backup_exists().await);
    }
}
