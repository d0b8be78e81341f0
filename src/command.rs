use std::fmt;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Processes killed by a signal are reported as `128 + signal`, the way POSIX
/// shells do.
pub type ExitCode = i32;

/// Whether the dispatcher blocks on a command before moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Wait for the process to finish before the next command is parsed.
    #[default]
    Foreground,
    /// Return to the caller right after the launch.
    Background,
}

/// One command segment of an input line, ready to launch.
///
/// The argument vector is owned and never empty; `argv[0]` is the program
/// name. None of the arguments contain blanks, `;` or `&`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    argv: Vec<String>,
    mode: ExecutionMode,
}

impl Command {
    pub(crate) fn new(argv: Vec<String>, mode: ExecutionMode) -> Self {
        debug_assert!(!argv.is_empty(), "a command needs a program name");
        Self { argv, mode }
    }

    /// Executable name, resolved against `PATH` at launch.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments following the program name.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// The full argument vector, program name included.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn is_background(&self) -> bool {
        self.mode == ExecutionMode::Background
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))?;
        if self.is_background() {
            f.write_str(" &")?;
        }
        Ok(())
    }
}
