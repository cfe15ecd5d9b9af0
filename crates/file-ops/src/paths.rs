//! Game directory layout and preset-root path translation.

use std::path::{Path, PathBuf};

use crate::{BACKUP_DIR_NAME, DEFAULT_GAME_PACKAGE, DEFAULT_STORAGE_ROOT};

/// Absolute paths the config operations work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePaths {
    /// Shared storage mount (`/storage/emulated/0`).
    pub storage_root: PathBuf,
    /// The game's live config directory.
    pub config_dir: PathBuf,
    /// Where the one-time backup is kept.
    pub backup_dir: PathBuf,
}

impl GamePaths {
    /// Builds the standard layout for `package` under `storage_root`.
    pub fn new(storage_root: impl Into<PathBuf>, package: &str) -> Self {
        let storage_root = storage_root.into();
        let config_dir = storage_root
            .join("Android")
            .join("data")
            .join(package)
            .join("files/UE4Game/Client/Client/Saved/Config/Android");
        let backup_dir = storage_root.join(BACKUP_DIR_NAME);

        Self {
            storage_root,
            config_dir,
            backup_dir,
        }
    }

    /// Replaces the derived directories with explicit ones where given.
    pub fn with_overrides(mut self, config_dir: Option<PathBuf>, backup_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = config_dir {
            self.config_dir = dir;
        }
        if let Some(dir) = backup_dir {
            self.backup_dir = dir;
        }
        self
    }
}

impl Default for GamePaths {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_ROOT, DEFAULT_GAME_PACKAGE)
    }
}

/// Derives the raw filesystem path behind a permission-scoped folder reference.
///
/// Accepts a tree URI (`content://…/tree/primary%3AGames`) or a bare
/// document ID (`primary:Games`). The part after the first `:` is taken
/// as relative to `storage_root`. Returns an empty string when the
/// reference has no `:`.
pub fn raw_path_from_reference(reference: &str, storage_root: &Path) -> String {
    let Some(path) = document_path(reference) else {
        return String::new();
    };

    let mut parts = path.split(':');
    parts.next();
    match parts.next() {
        Some(relative) => format!(
            "{}/{relative}",
            storage_root.to_string_lossy().trim_end_matches('/')
        ),
        None => String::new(),
    }
}

/// Resolves a stored root reference to a directory path.
///
/// Absolute paths pass through unchanged; anything else goes through
/// [`raw_path_from_reference`]. Returns `None` when nothing usable comes out.
pub fn resolve_root(reference: &str, storage_root: &Path) -> Option<PathBuf> {
    let reference = reference.trim();
    if reference.starts_with('/') {
        return Some(PathBuf::from(reference));
    }

    let raw = raw_path_from_reference(reference, storage_root);
    (!raw.is_empty()).then(|| PathBuf::from(raw))
}

/// Returns the path component of a reference.
///
/// Tree URIs are percent-decoded; bare document IDs are taken literally.
fn document_path(reference: &str) -> Option<String> {
    if !reference.contains("://") {
        return Some(reference.to_string());
    }

    let url = url::Url::parse(reference)
        .inspect_err(|e| tracing::debug!(reference, error = %e, "unparseable folder reference"))
        .ok()?;
    urlencoding::decode(url.path()).ok().map(|s| s.into_owned())
}
