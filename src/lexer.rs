//! Splitting of an input line into commands.
//!
//! A line holds one or more command segments separated by `;`. Segments are
//! pulled one at a time with [`next_command`], which takes the [`Cursor`]
//! returned by the previous call and hands back the cursor for the next one.
//! Tokens are runs of non-blank characters; only space and tab are blanks.

use crate::command::{Command, ExecutionMode};

/// Separates two commands on the same line.
pub const SEPARATOR: u8 = b';';
/// Marks the last command of a line as a background command.
pub const BACKGROUND: u8 = b'&';

/// Resume position into a line, threaded through successive [`next_command`] calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: usize,
    exhausted: bool,
}

impl Cursor {
    /// Cursor positioned at the beginning of a fresh line.
    pub fn start() -> Self {
        Self::default()
    }

    fn resume_at(pos: usize) -> Self {
        Self {
            pos,
            exhausted: false,
        }
    }

    fn finished(len: usize) -> Self {
        Self {
            pos: len,
            exhausted: true,
        }
    }

    /// Byte offset where the next segment starts.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once no `;`-chained segment is left on the line.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Byte scanner that locates the end of the current segment.
struct SegmentScanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> SegmentScanner<'a> {
    fn new(input: &'a [u8], pos: usize) -> Self {
        SegmentScanner { input, pos }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = self.input.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Returns the end of the segment and, when another segment follows, the
    /// offset just past the separator.
    ///
    /// A `;` that is the last byte of the line is not a boundary; it stays in
    /// the segment and is trimmed off the final token.
    fn segment_end(&mut self) -> (usize, Option<usize>) {
        while let Some(byte) = self.read_byte() {
            if byte == SEPARATOR && self.peek_byte().is_some() {
                return (self.pos - 1, Some(self.pos));
            }
        }
        (self.input.len(), None)
    }
}

/// Tokens of one segment, plus whether a background marker was seen in it.
fn split_segment(segment: &str) -> (Vec<String>, bool) {
    let mut saw_background = false;
    let argv = segment
        .split([' ', '\t'])
        .filter(|run| !run.is_empty())
        .filter_map(|run| {
            if run.as_bytes().contains(&BACKGROUND) {
                saw_background = true;
            }
            // `;` and `&` end the token and never appear in its text.
            let end = run
                .bytes()
                .position(|b| b == SEPARATOR || b == BACKGROUND)
                .unwrap_or(run.len());
            (end > 0).then(|| run[..end].to_string())
        })
        .collect();
    (argv, saw_background)
}

/// Produces the next command of `line` starting at `cursor`.
///
/// Returns `None` once only blanks remain. Segments without any token (for
/// example `ls ; ; pwd`) are skipped. A command is run in the background only
/// when it is the last segment of the line and one of its words contains `&`;
/// an `&` in a segment chained to a later `;` segment is ignored.
pub fn next_command(line: &str, cursor: Cursor) -> Option<(Command, Cursor)> {
    let mut cursor = cursor;
    while !cursor.exhausted {
        let start = cursor.pos.min(line.len());
        let (end, resume) = SegmentScanner::new(line.as_bytes(), start).segment_end();
        cursor = match resume {
            Some(next) => Cursor::resume_at(next),
            None => Cursor::finished(line.len()),
        };

        let (argv, saw_background) = split_segment(&line[start..end]);
        if argv.is_empty() {
            continue;
        }

        let mode = if cursor.exhausted && saw_background {
            ExecutionMode::Background
        } else {
            ExecutionMode::Foreground
        };
        return Some((Command::new(argv, mode), cursor));
    }
    None
}

/// Iterator over all commands of a line, in order.
pub struct Commands<'a> {
    line: &'a str,
    cursor: Cursor,
}

impl Iterator for Commands<'_> {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        match next_command(self.line, self.cursor) {
            Some((command, cursor)) => {
                self.cursor = cursor;
                Some(command)
            }
            None => {
                self.cursor = Cursor::finished(self.line.len());
                None
            }
        }
    }
}

/// Splits a whole line into its commands.
pub fn split_commands(line: &str) -> Commands<'_> {
    Commands {
        line,
        cursor: Cursor::start(),
    }
}
