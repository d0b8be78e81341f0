use crate::command::{Command, ExecutionMode, ExitCode};
use crate::config::{EXIT_KEYWORD, ShellConfig};
use crate::error::Result;
use crate::external::{
    LAUNCH_FAILURE_MESSAGE, LAUNCH_FAILURE_STATUS, Launcher, ProcessHandle, SystemLauncher,
};
use crate::io_adapters::{LineSource, ReadOutcome};
use crate::jobs::JobTable;
use crate::lexer::{Cursor, next_command};
use std::io::Write;
use tracing::{debug, info, warn};

/// What happened while one input line was dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Commands that were started.
    pub launched: usize,
    /// Commands that could not be started.
    pub failed: usize,
    /// Started commands left running in the background.
    pub backgrounded: usize,
    /// Exit code of the last foreground command, if any ran.
    pub last_status: Option<ExitCode>,
}

/// Turns input lines into process launches.
///
/// Commands of a line run left to right. A foreground command is waited on
/// through its own handle before the next segment is parsed, so background
/// children from earlier lines are never collected in its place. Background
/// handles are kept in a [`JobTable`] until they are reaped or drained.
pub struct Dispatcher<L: Launcher> {
    launcher: L,
    jobs: JobTable<L::Handle>,
    diagnostics: Box<dyn Write>,
}

impl<L: Launcher> Dispatcher<L> {
    /// Create a dispatcher reporting launch failures on standard error.
    pub fn new(launcher: L) -> Self {
        Self::with_diagnostics(launcher, Box::new(std::io::stderr()))
    }

    /// Create a dispatcher reporting launch failures to `diagnostics`.
    pub fn with_diagnostics(launcher: L, diagnostics: Box<dyn Write>) -> Self {
        Self {
            launcher,
            jobs: JobTable::new(),
            diagnostics,
        }
    }

    pub fn jobs(&self) -> &JobTable<L::Handle> {
        &self.jobs
    }

    /// Launch every command of `line`.
    pub fn dispatch(&mut self, line: &str) -> DispatchReport {
        let mut report = DispatchReport::default();
        let mut cursor = Cursor::start();
        while let Some((command, next)) = next_command(line, cursor) {
            cursor = next;
            self.execute(command, &mut report);
        }
        report
    }

    /// Launch one command and apply its wait policy. The command is dropped
    /// on return whatever the outcome.
    fn execute(&mut self, command: Command, report: &mut DispatchReport) {
        debug!(%command, "launching");
        let mut handle = match self.launcher.launch(&command) {
            Ok(handle) => handle,
            Err(err) => {
                debug!("{err}");
                report.failed += 1;
                if command.mode() == ExecutionMode::Foreground {
                    report.last_status = Some(LAUNCH_FAILURE_STATUS);
                }
                if let Err(err) = self
                    .diagnostics
                    .write_all(LAUNCH_FAILURE_MESSAGE.as_bytes())
                    .and_then(|()| self.diagnostics.flush())
                {
                    warn!("could not report launch failure: {err}");
                }
                return;
            }
        };
        report.launched += 1;

        match command.mode() {
            ExecutionMode::Foreground => match handle.wait() {
                Ok(code) => {
                    debug!(pid = handle.id(), code, "command finished");
                    report.last_status = Some(code);
                }
                Err(err) => warn!("{err}"),
            },
            ExecutionMode::Background => {
                report.backgrounded += 1;
                self.jobs.push(handle, command.program());
            }
        }
    }

    /// Collect background jobs that already exited.
    pub fn reap_finished(&mut self) -> usize {
        self.jobs.reap().len()
    }

    /// Wait for all outstanding background jobs.
    pub fn drain(&mut self) -> usize {
        self.jobs.drain()
    }
}

/// A minimal interactive shell: prompt, read a line, run its commands, repeat.
///
/// The loop ends on the exact line `exit`, on end of input, or when the prompt
/// is interrupted. Before returning, it waits for every background command
/// still running.
///
/// Example
/// ```
/// use std::io::Cursor;
/// use tinysh::{Interpreter, PipedSource, ShellConfig};
///
/// let mut sh = Interpreter::new(ShellConfig::default());
/// let mut input = PipedSource::new(Cursor::new("   \nexit\n"), std::io::sink());
/// assert_eq!(sh.repl(&mut input).unwrap(), 0);
/// ```
pub struct Interpreter<L: Launcher = SystemLauncher> {
    config: ShellConfig,
    dispatcher: Dispatcher<L>,
}

impl Interpreter<SystemLauncher> {
    /// Create an interpreter that starts real processes.
    pub fn new(config: ShellConfig) -> Self {
        Self::with_dispatcher(config, Dispatcher::new(SystemLauncher))
    }
}

impl Default for Interpreter<SystemLauncher> {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl<L: Launcher> Interpreter<L> {
    pub fn with_dispatcher(config: ShellConfig, dispatcher: Dispatcher<L>) -> Self {
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher<L> {
        &self.dispatcher
    }

    /// Run lines from `source` until `exit`, end of input or an interrupt.
    ///
    /// Returns the shell's exit code, 0 on every normal way out. Errors reading
    /// input end the loop; background jobs are still drained first.
    pub fn repl(&mut self, source: &mut dyn LineSource) -> Result<ExitCode> {
        let outcome = self.read_loop(source);
        let drained = self.dispatcher.drain();
        if drained > 0 {
            info!(drained, "background jobs finished");
        }
        outcome.map(|()| 0)
    }

    fn read_loop(&mut self, source: &mut dyn LineSource) -> Result<()> {
        loop {
            self.dispatcher.reap_finished();

            let line = match source.read_line(&self.config.prompt)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof => {
                    debug!("end of input");
                    return Ok(());
                }
                ReadOutcome::Interrupted => {
                    debug!("interrupted");
                    return Ok(());
                }
            };

            let (line, clipped) = self.config.clip(line);
            if clipped {
                warn!(
                    limit = self.config.line_limit(),
                    "input line too long, extra bytes dropped"
                );
            }
            if line == EXIT_KEYWORD {
                return Ok(());
            }

            let report = self.dispatcher.dispatch(&line);
            debug!(?report, "line done");
        }
    }
}
