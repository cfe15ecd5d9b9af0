//! Shell execution error types.

/// Errors produced while running a command through a bridge.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("empty command")]
    EmptyCommand,

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} was terminated by a signal")]
    Signalled(String),

    #[error("unknown bridge: {0}")]
    UnknownBridge(String),
}
