//! Sources of input lines and in-memory writers.

use crate::config::DEFAULT_MAX_LINE;
use crate::error::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::cell::RefCell;
use std::io::{self, BufRead, Read, Result as IoResult, Write};
use std::rc::Rc;

/// What a [`LineSource`] produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of input, possibly still ending in `\n`.
    Line(String),
    /// Input is closed.
    Eof,
    /// The user interrupted the prompt (Ctrl-C).
    Interrupted,
}

/// Something that shows a prompt and returns the next line typed at it.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Interactive line editor for terminals, with in-memory history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Plain reader for piped input: writes the prompt to `out`, then reads one line.
///
/// At most `limit` bytes of a line are kept; the rest of an over-long line is
/// skipped up to its newline. Bytes that are not valid UTF-8 are replaced with
/// U+FFFD instead of failing the read.
pub struct PipedSource<R, W> {
    reader: R,
    out: W,
    limit: usize,
}

impl<R: BufRead, W: Write> PipedSource<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self {
            reader,
            out,
            limit: DEFAULT_MAX_LINE,
        }
    }

    /// Keep at most `limit` bytes of each line, newline included.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }
}

impl PipedSource<io::StdinLock<'static>, io::Stdout> {
    /// Read from standard input, prompting on standard output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineSource for PipedSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.out.write_all(prompt.as_bytes())?;
        self.out.flush()?;
        let mut buf = Vec::new();
        let read = (&mut self.reader)
            .take(self.limit as u64)
            .read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(ReadOutcome::Eof);
        }
        if read == self.limit && !buf.ends_with(b"\n") {
            self.reader.skip_until(b'\n')?;
        }
        Ok(ReadOutcome::Line(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Memory-backed writer for capturing prompts and diagnostics.
#[derive(Clone, Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}
