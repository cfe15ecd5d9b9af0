//! Privilege bridge trait and the process-spawning implementations.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ShellError;
use crate::quote::join;

/// Boxed future returned by bridge methods.
pub type BridgeFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A service that can spawn processes with elevated file-system access.
///
/// The executor only ever needs "spawn privileged process(argv) -> exit
/// code" and a permission check, so that is all the trait exposes. Tests
/// implement it with mocks.
pub trait PrivilegeBridge: Send + Sync {
    /// Short name for logs and status output.
    fn name(&self) -> &str;

    /// Returns `true` when the bridge is reachable and the user granted it.
    fn check_permission(&self) -> BridgeFuture<'_, bool>;

    /// Runs `argv` with elevated privileges and returns its exit code.
    fn spawn<'a>(&'a self, argv: &'a [String]) -> BridgeFuture<'a, Result<i32, ShellError>>;
}

/// Which bridge to run commands through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeKind {
    /// Shizuku's shell (`rish -c`). Runs as the `shell` user.
    #[default]
    Rish,
    /// A root shell (`su -c`).
    Su,
    /// Plain `sh` on this host, without elevation.
    Local,
}

impl BridgeKind {
    /// Program used to enter the bridge.
    pub fn default_program(&self) -> &'static str {
        match self {
            BridgeKind::Rish => "rish",
            BridgeKind::Su => "su",
            BridgeKind::Local => "sh",
        }
    }
}

impl fmt::Display for BridgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeKind::Rish => write!(f, "rish"),
            BridgeKind::Su => write!(f, "su"),
            BridgeKind::Local => write!(f, "local"),
        }
    }
}

impl FromStr for BridgeKind {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rish" | "shizuku" => Ok(BridgeKind::Rish),
            "su" | "root" => Ok(BridgeKind::Su),
            "local" | "sh" => Ok(BridgeKind::Local),
            other => Err(ShellError::UnknownBridge(other.to_string())),
        }
    }
}

/// Bridge backed by an external program.
///
/// `rish`, `su` and `sh` all take `-c <command line>`, so the argv is
/// quoted into one string and handed to the program.
#[derive(Debug, Clone)]
pub struct CommandBridge {
    kind: BridgeKind,
    program: String,
}

impl CommandBridge {
    /// Creates a bridge using the kind's default program.
    pub fn new(kind: BridgeKind) -> Self {
        Self {
            kind,
            program: kind.default_program().to_string(),
        }
    }

    /// Creates a bridge with an explicit program path (e.g. `/data/local/tmp/rish`).
    pub fn with_program(kind: BridgeKind, program: impl Into<String>) -> Self {
        Self {
            kind,
            program: program.into(),
        }
    }

    fn command(&self, argv: &[String]) -> Result<tokio::process::Command, ShellError> {
        if argv.is_empty() {
            return Err(ShellError::EmptyCommand);
        }

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.arg("-c")
            .arg(join(argv))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(cmd)
    }
}

impl PrivilegeBridge for CommandBridge {
    fn name(&self) -> &str {
        &self.program
    }

    fn check_permission(&self) -> BridgeFuture<'_, bool> {
        Box::pin(async move {
            if self.kind == BridgeKind::Local {
                return true;
            }

            let output = tokio::process::Command::new(&self.program)
                .args(["-c", "id"])
                .stdin(Stdio::null())
                .output()
                .await;

            match output {
                Ok(o) => o.status.success(),
                Err(e) => {
                    tracing::debug!(program = %self.program, error = %e, "bridge not reachable");
                    false
                }
            }
        })
    }

    fn spawn<'a>(&'a self, argv: &'a [String]) -> BridgeFuture<'a, Result<i32, ShellError>> {
        Box::pin(async move {
            let mut cmd = self.command(argv)?;
            let output = cmd.output().await.map_err(|e| ShellError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

            if !output.stderr.is_empty() {
                tracing::debug!(
                    program = %self.program,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                    "bridge process wrote to stderr"
                );
            }

            output
                .status
                .code()
                .ok_or_else(|| ShellError::Signalled(self.program.clone()))
        })
    }
}
