//! Privileged config operations on the game's directories.

use std::path::Path;

use wuwatool_shell::{ShellExecutor, quote};

use crate::GamePaths;

/// Backup and apply operations, run through the privileged shell.
///
/// Clone it into a spawned task to run an action off the caller's task.
#[derive(Debug, Clone)]
pub struct ConfigOps {
    pub(crate) shell: ShellExecutor,
    pub(crate) paths: GamePaths,
}

impl ConfigOps {
    /// Creates the operations for `paths`, executing through `shell`.
    pub fn new(shell: ShellExecutor, paths: GamePaths) -> Self {
        Self { shell, paths }
    }

    /// Returns the directory layout in use.
    pub fn paths(&self) -> &GamePaths {
        &self.paths
    }

    /// Returns the executor in use.
    pub fn shell(&self) -> &ShellExecutor {
        &self.shell
    }

    /// Tests for a directory with `[ -d … ]` through the shell.
    pub(crate) async fn dir_exists(&self, dir: &Path) -> bool {
        self.shell.exec(&format!("[ -d {} ]", q(dir))).await
    }

    /// Creates a directory (and parents) through the shell.
    pub(crate) async fn make_dir(&self, dir: &Path) -> bool {
        self.shell.exec(&format!("mkdir -p {}", q(dir))).await
    }
}

/// Quotes a path for interpolation into a command string.
pub(crate) fn q(path: &Path) -> String {
    quote(&path.to_string_lossy())
}

/// Quotes a directory with a trailing slash so `cp` treats it as a target dir.
pub(crate) fn q_dir(path: &Path) -> String {
    let mut s = path.to_string_lossy().into_owned();
    if !s.ends_with('/') {
        s.push('/');
    }
    quote(&s)
}
