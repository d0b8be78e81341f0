//! A tiny interactive command interpreter.
//!
//! Each input line is split into `;`-separated commands which are started as
//! separate processes, left to right. A foreground command is waited on before
//! the next one is parsed; the last command of a line runs in the background
//! when it carries an `&`. There is no quoting, expansion, redirection or
//! piping, and `exit` is the only built-in.
//!
//! The main entry point is [`Interpreter`], which reads lines from a
//! [`LineSource`] and hands them to a [`Dispatcher`]. Process creation goes
//! through the [`Launcher`] trait so that the splitting and wait logic can be
//! exercised without starting real programs.

pub mod command;
pub mod config;
pub mod error;
pub mod external;
mod interpreter;
pub mod io_adapters;
pub mod jobs;
pub mod lexer;

#[cfg(test)]
mod mock;

pub use command::{Command, ExecutionMode, ExitCode};
pub use config::ShellConfig;
pub use error::{Result, ShellError};
pub use external::{Launcher, ProcessHandle, SystemLauncher};
pub use interpreter::{DispatchReport, Dispatcher, Interpreter};
pub use io_adapters::{EditorSource, LineSource, PipedSource, ReadOutcome};
pub use lexer::{Cursor, next_command, split_commands};
