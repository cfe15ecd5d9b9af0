//! Runs shell command strings through a privilege bridge.

use std::sync::Arc;

use crate::{PrivilegeBridge, ShellError};

/// Executes shell commands with elevated privileges.
///
/// Cheap to clone; every clone shares the same bridge.
#[derive(Clone)]
pub struct ShellExecutor {
    bridge: Arc<dyn PrivilegeBridge>,
}

impl ShellExecutor {
    /// Creates an executor on top of `bridge`.
    pub fn new(bridge: Arc<dyn PrivilegeBridge>) -> Self {
        Self { bridge }
    }

    /// Returns the underlying bridge.
    pub fn bridge(&self) -> &dyn PrivilegeBridge {
        self.bridge.as_ref()
    }

    /// Runs `command` as `sh -c <command>` and returns its exit code.
    pub async fn run(&self, command: &str) -> Result<i32, ShellError> {
        if command.trim().is_empty() {
            return Err(ShellError::EmptyCommand);
        }

        let argv = vec!["sh".to_string(), "-c".to_string(), command.to_string()];
        tracing::debug!(bridge = self.bridge.name(), command, "running shell command");
        self.bridge.spawn(&argv).await
    }

    /// Runs `command` and reports whether it exited with status 0.
    ///
    /// Bridge failures and non-zero exits both come back as `false`.
    pub async fn exec(&self, command: &str) -> bool {
        match self.run(command).await {
            Ok(0) => true,
            Ok(code) => {
                tracing::debug!(code, command, "shell command exited non-zero");
                false
            }
            Err(e) => {
                tracing::warn!(bridge = self.bridge.name(), error = %e, command, "shell command failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for ShellExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellExecutor")
            .field("bridge", &self.bridge.name())
            .finish()
    }
}
