//! File operation error types.

use std::path::PathBuf;

/// Errors produced while listing or deleting presets.
#[derive(Debug, thiserror::Error)]
pub enum FileOpsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("invalid preset name: {0:?}")]
    InvalidName(String),

    #[error("refusing to delete path outside the preset root: {0}")]
    OutsideRoot(PathBuf),
}

impl FileOpsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
