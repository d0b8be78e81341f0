//! Shell settings.

use crate::error::{Result, ShellError};

/// Prompt written before each line is read.
pub const DEFAULT_PROMPT: &str = "$ ";

/// The line that ends the shell.
pub const EXIT_KEYWORD: &str = "exit";

/// Input buffer size in bytes, line terminator included.
pub const DEFAULT_MAX_LINE: usize = 256;

/// Settings consumed by the [`Interpreter`](crate::Interpreter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Prompt written before each read.
    pub prompt: String,
    max_line: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

impl ShellConfig {
    /// Build a configuration, rejecting buffers too small to hold a character
    /// and its terminator.
    pub fn new(prompt: impl Into<String>, max_line: usize) -> Result<Self> {
        if max_line < 2 {
            return Err(ShellError::Config(format!(
                "max line length must be at least 2 bytes, got {max_line}"
            )));
        }
        Ok(Self {
            prompt: prompt.into(),
            max_line,
        })
    }

    pub fn max_line(&self) -> usize {
        self.max_line
    }

    /// Longest line text kept, in bytes, once the terminator is accounted for.
    pub fn line_limit(&self) -> usize {
        self.max_line - 1
    }

    /// Strip the trailing newline and cut the line to [`line_limit`](Self::line_limit)
    /// bytes on a character boundary.
    ///
    /// Returns the line and whether anything past the newline was dropped.
    pub fn clip(&self, mut line: String) -> (String, bool) {
        if line.ends_with('\n') {
            line.pop();
        }
        let limit = self.line_limit();
        if line.len() <= limit {
            return (line, false);
        }
        let mut end = limit;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        line.truncate(end);
        (line, true)
    }
}
