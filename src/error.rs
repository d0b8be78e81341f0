//! Error types shared by the interpreter, the launcher and the line sources.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Errors raised while reading input or managing child processes.
///
/// A failed launch never stops the shell: the dispatcher reports it with a
/// fixed message and moves on. The remaining variants end the read loop.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for process {pid}: {source}")]
    Wait {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("line editor failed: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),

    #[error("invalid configuration: {0}")]
    Config(String),
}
