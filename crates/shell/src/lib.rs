//! Privileged shell execution.
//!
//! Commands are plain shell strings. They are handed to a
//! [`PrivilegeBridge`] as `sh -c <command>` and only the exit status
//! comes back. The bridge decides how the process gets its elevated
//! file-system access (Shizuku's `rish`, a root `su`, or nothing at all
//! for the local shell).

mod bridge;
mod error;
mod executor;
mod quote;

pub use bridge::{BridgeFuture, BridgeKind, CommandBridge, PrivilegeBridge};
pub use error::ShellError;
pub use executor::ShellExecutor;
pub use quote::{join, quote};
