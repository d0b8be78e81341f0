use crate::command::{Command, ExitCode};
use crate::error::{Result, ShellError};
use std::process::{Child, ExitStatus};

/// Written to standard error when a command cannot be started.
pub const LAUNCH_FAILURE_MESSAGE: &str = "Command failed to execute!\n";

/// Status recorded for a command that could not be started.
pub const LAUNCH_FAILURE_STATUS: ExitCode = 1;

/// A running (or finished) process started by a [`Launcher`].
pub trait ProcessHandle {
    /// OS process id.
    fn id(&self) -> u32;

    /// Block until this process exits and return its exit code.
    fn wait(&mut self) -> Result<ExitCode>;

    /// Return the exit code if the process already exited, without blocking.
    fn try_wait(&mut self) -> Result<Option<ExitCode>>;
}

/// Starts commands as separate processes.
///
/// Implementations receive the whole [`Command`]; the program name is resolved
/// by the implementation, no shell expansion is performed on the arguments.
pub trait Launcher {
    type Handle: ProcessHandle;

    /// Start `command` and return a handle to the new process.
    fn launch(&mut self, command: &Command) -> Result<Self::Handle>;
}

/// Launcher backed by [`std::process::Command`].
///
/// Children inherit the shell's standard streams, environment and working
/// directory. Bare program names are looked up in `PATH` by the standard
/// library.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    type Handle = ChildProcess;

    fn launch(&mut self, command: &Command) -> Result<ChildProcess> {
        std::process::Command::new(command.program())
            .args(command.args())
            .spawn()
            .map(ChildProcess)
            .map_err(|source| ShellError::Launch {
                program: command.program().to_owned(),
                source,
            })
    }
}

/// Handle to a child spawned by [`SystemLauncher`].
#[derive(Debug)]
pub struct ChildProcess(Child);

impl ProcessHandle for ChildProcess {
    fn id(&self) -> u32 {
        self.0.id()
    }

    fn wait(&mut self) -> Result<ExitCode> {
        let pid = self.0.id();
        self.0
            .wait()
            .map(exit_code)
            .map_err(|source| ShellError::Wait { pid, source })
    }

    fn try_wait(&mut self) -> Result<Option<ExitCode>> {
        let pid = self.0.id();
        self.0
            .try_wait()
            .map(|status| status.map(exit_code))
            .map_err(|source| ShellError::Wait { pid, source })
    }
}

fn exit_code(exit_status: ExitStatus) -> ExitCode {
    match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
