//! Safe preset deletion.

use std::path::{Path, PathBuf};

use crate::{FileOpsError, RESERVED_BACKUP_NAME};

/// Deletes the preset folder `root/name` and everything in it.
///
/// Safety checks:
/// 1. `name` must be a single plain folder name (no separators, not hidden,
///    not `.`/`..`, not the reserved `backup`).
/// 2. The target must be an existing directory itself, not a symlink to one.
/// 3. The target must resolve to a direct child of `root`.
pub fn delete_preset(root: &Path, name: &str) -> Result<PathBuf, FileOpsError> {
    validate_name(name)?;

    let target = root.join(name);
    let meta = std::fs::symlink_metadata(&target).map_err(|e| FileOpsError::io(&target, e))?;
    if !meta.file_type().is_dir() {
        return Err(FileOpsError::NotADirectory(target));
    }

    let abs = std::fs::canonicalize(&target).map_err(|e| FileOpsError::io(&target, e))?;

    let root_canon = std::fs::canonicalize(root).map_err(|e| FileOpsError::io(root, e))?;
    if abs.parent() != Some(root_canon.as_path()) {
        return Err(FileOpsError::OutsideRoot(abs));
    }

    std::fs::remove_dir_all(&abs).map_err(|e| FileOpsError::io(&abs, e))?;

    tracing::info!(path = %abs.display(), "deleted preset");
    Ok(abs)
}

fn validate_name(name: &str) -> Result<(), FileOpsError> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
        || name == RESERVED_BACKUP_NAME;

    if invalid {
        return Err(FileOpsError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BACKUP_FILES, GamePaths, list_presets};

    #[test]
    fn removes_preset_from_next_listing_only() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for name in ["Low", "High", "backup"] {
            std::fs::create_dir(root.join(name)).unwrap();
            std::fs::write(root.join(name).join("Engine.ini"), name).unwrap();
        }
        let before: Vec<_> = list_presets(root).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(before, ["High", "Low"]);

        delete_preset(root, "Low").unwrap();

        let after: Vec<_> = list_presets(root).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(after, ["High"]);
        assert!(root.join("High").join("Engine.ini").is_file());
        assert!(root.join("backup").join("Engine.ini").is_file());
    }

    #[test]
    fn refuses_reserved_and_hidden_names() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir(root.join("backup")).unwrap();
        std::fs::create_dir(root.join(".cache")).unwrap();

        for name in ["backup", ".cache", "", ".", ".."] {
            let result = delete_preset(root, name);
            assert!(matches!(result, Err(FileOpsError::InvalidName(_))), "{name:?}");
        }
        assert!(root.join("backup").exists());
        assert!(root.join(".cache").exists());
    }

    #[test]
    fn refuses_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("root");
        std::fs::create_dir_all(root.join("a")).unwrap();
        std::fs::create_dir_all(tmp.path().join("victim")).unwrap();

        assert!(delete_preset(&root, "../victim").is_err());
        assert!(delete_preset(&root, "a/..").is_err());
        assert!(tmp.path().join("victim").exists());
    }

    #[cfg(unix)]
    #[test]
    fn refuses_symlink_escaping_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("root");
        let outside = tmp.path().join("outside");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&outside).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        let result = delete_preset(&root, "link");
        assert!(matches!(result, Err(FileOpsError::NotADirectory(_))));
        assert!(outside.exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_name_never_reaches_sibling_preset() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir(root.join("High")).unwrap();
        std::fs::write(root.join("High").join("Engine.ini"), "high").unwrap();
        std::os::unix::fs::symlink(root.join("High"), root.join("Alias")).unwrap();

        let names: Vec<_> = list_presets(root).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["High"]);

        let result = delete_preset(root, "Alias");
        assert!(matches!(result, Err(FileOpsError::NotADirectory(_))));
        assert!(root.join("High").join("Engine.ini").is_file());
        assert!(root.join("Alias").symlink_metadata().is_ok());
    }

    #[test]
    fn game_backup_dir_survives_preset_deletion() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = GamePaths::new(tmp.path(), "pkg");
        std::fs::create_dir_all(&paths.backup_dir).unwrap();
        for file in BACKUP_FILES {
            std::fs::write(paths.backup_dir.join(file), file).unwrap();
        }

        let root = tmp.path().join("Presets");
        for name in ["Low", "High"] {
            std::fs::create_dir_all(root.join(name)).unwrap();
            std::fs::write(root.join(name).join("Engine.ini"), name).unwrap();
        }

        delete_preset(&root, "Low").unwrap();

        assert!(!root.join("Low").exists());
        assert!(root.join("High").join("Engine.ini").is_file());
        for file in BACKUP_FILES {
            assert!(paths.backup_dir.join(file).is_file(), "{file}");
        }
    }

    #[test]
    fn refuses_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("Engine.ini"), "x").unwrap();

        let result = delete_preset(tmp.path(), "Engine.ini");
        assert!(matches!(result, Err(FileOpsError::NotADirectory(_))));
    }

    #[test]
    fn missing_preset_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = delete_preset(tmp.path(), "Ghost").unwrap_err();
        assert!(matches!(err, FileOpsError::Io { .. }));
    }
}
