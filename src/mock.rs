//! Recording launcher for testing.
//!
//! Nothing is started; launches and waits are appended to a shared event log
//! so tests can check ordering and wait semantics of the dispatcher.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::rc::Rc;

use crate::command::{Command, ExecutionMode, ExitCode};
use crate::error::{Result, ShellError};
use crate::external::{Launcher, ProcessHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Launched {
        pid: u32,
        argv: Vec<String>,
        mode: ExecutionMode,
    },
    Waited(u32),
    Polled(u32),
}

pub(crate) type EventLog = Rc<RefCell<Vec<Event>>>;

pub(crate) struct MockLauncher {
    events: EventLog,
    missing: HashSet<String>,
    running: HashSet<String>,
    statuses: HashMap<String, ExitCode>,
    next_pid: u32,
}

impl MockLauncher {
    pub(crate) fn new() -> Self {
        MockLauncher {
            events: Rc::new(RefCell::new(Vec::new())),
            missing: HashSet::new(),
            running: HashSet::new(),
            statuses: HashMap::new(),
            next_pid: 100,
        }
    }

    /// Make launches of `program` fail as if it were not on `PATH`.
    pub(crate) fn missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    /// Keep processes of `program` running until they are waited on.
    pub(crate) fn long_running(mut self, program: &str) -> Self {
        self.running.insert(program.to_string());
        self
    }

    pub(crate) fn exit_status(mut self, program: &str, code: ExitCode) -> Self {
        self.statuses.insert(program.to_string(), code);
        self
    }

    /// Shared handle to the event log; stays valid after the launcher is moved.
    pub(crate) fn log(&self) -> EventLog {
        Rc::clone(&self.events)
    }
}

impl Launcher for MockLauncher {
    type Handle = MockProcess;

    fn launch(&mut self, command: &Command) -> Result<MockProcess> {
        if self.missing.contains(command.program()) {
            return Err(ShellError::Launch {
                program: command.program().to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        let pid = self.next_pid;
        self.next_pid += 1;
        self.events.borrow_mut().push(Event::Launched {
            pid,
            argv: command.argv().to_vec(),
            mode: command.mode(),
        });
        Ok(MockProcess {
            pid,
            status: self.statuses.get(command.program()).copied().unwrap_or(0),
            running: self.running.contains(command.program()),
            events: Rc::clone(&self.events),
        })
    }
}

pub(crate) struct MockProcess {
    pid: u32,
    status: ExitCode,
    running: bool,
    events: EventLog,
}

impl ProcessHandle for MockProcess {
    fn id(&self) -> u32 {
        self.pid
    }

    fn wait(&mut self) -> Result<ExitCode> {
        self.events.borrow_mut().push(Event::Waited(self.pid));
        self.running = false;
        Ok(self.status)
    }

    fn try_wait(&mut self) -> Result<Option<ExitCode>> {
        self.events.borrow_mut().push(Event::Polled(self.pid));
        Ok((!self.running).then_some(self.status))
    }
}

/// All launched argument vectors, in launch order.
pub(crate) fn launched(log: &EventLog) -> Vec<Vec<String>> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            Event::Launched { argv, .. } => Some(argv.clone()),
            _ => None,
        })
        .collect()
}
