//! Bookkeeping for commands started in the background.

use crate::command::ExitCode;
use crate::external::ProcessHandle;
use tracing::{debug, info, warn};

struct Job<H> {
    handle: H,
    program: String,
}

/// Handles of background processes that have not been reaped yet.
pub struct JobTable<H> {
    jobs: Vec<Job<H>>,
}

impl<H> Default for JobTable<H> {
    fn default() -> Self {
        Self { jobs: Vec::new() }
    }
}

impl<H: ProcessHandle> JobTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly launched background process.
    pub fn push(&mut self, handle: H, program: &str) {
        debug!(pid = handle.id(), program, "started background job");
        self.jobs.push(Job {
            handle,
            program: program.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Collect jobs that already exited without blocking.
    ///
    /// Returns the pid and exit code of every job removed from the table. A job
    /// whose status cannot be queried is dropped with a warning.
    pub fn reap(&mut self) -> Vec<(u32, ExitCode)> {
        let mut finished = Vec::new();
        self.jobs.retain_mut(|job| match job.handle.try_wait() {
            Ok(Some(code)) => {
                debug!(pid = job.handle.id(), program = %job.program, code, "background job finished");
                finished.push((job.handle.id(), code));
                false
            }
            Ok(None) => true,
            Err(err) => {
                warn!("dropping background job {}: {err}", job.program);
                false
            }
        });
        finished
    }

    /// Block until every tracked job has exited. Returns how many were waited on.
    pub fn drain(&mut self) -> usize {
        let pending = std::mem::take(&mut self.jobs);
        if !pending.is_empty() {
            info!(count = pending.len(), "waiting for background jobs");
        }
        let mut waited = 0;
        for mut job in pending {
            match job.handle.wait() {
                Ok(code) => {
                    debug!(pid = job.handle.id(), program = %job.program, code, "background job finished");
                    waited += 1;
                }
                Err(err) => warn!("{err}"),
            }
        }
        waited
    }
}
