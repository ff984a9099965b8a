//! JobRunner: one self-rescheduling worker thread per registered job.

use super::slot::DataSlot;
use crate::app::{Job, JobValue};
use crate::schedule::RegistryError;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A registered job and its cached result.
struct JobEntry {
    job: Arc<dyn Job>,
    interval: Duration,
    slot: Arc<DataSlot>,
}

/// Handle to a spawned worker. Dropping the sender disconnects the
/// worker's shutdown channel, which it reads as the stop signal.
struct JobWorker {
    stop_tx: Sender<()>,
}

/// Executes registered jobs on independent repeating schedules and
/// exposes each job's latest result.
///
/// Every job gets a dedicated thread: run the job, publish the settled
/// result into the job's [`DataSlot`], wait out the interval, repeat.
/// The interval counts from *completion*, so a slow job naturally
/// self-throttles instead of stacking runs. Failures are logged and
/// swallowed; the cache keeps the last successful value.
#[derive(Default)]
pub struct JobRunner {
    entries: HashMap<String, JobEntry>,
    workers: Vec<JobWorker>,
}

impl JobRunner {
    /// Create an empty runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateJob`] if the name is taken.
    /// Silent overwrite would leak the old job's worker once started,
    /// so duplicates are rejected at setup time instead.
    pub fn register(
        &mut self,
        name: &str,
        job: Arc<dyn Job>,
        interval: Duration,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(name) {
            return Err(RegistryError::DuplicateJob(name.to_string()));
        }
        self.entries.insert(
            name.to_string(),
            JobEntry {
                job,
                interval,
                slot: Arc::new(DataSlot::new()),
            },
        );
        Ok(())
    }

    /// Check whether a job name is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the cached result of a job, or `None` if the job is unknown
    /// or has not completed a run yet.
    pub fn result_of(&self, name: &str) -> Option<JobValue> {
        self.entries.get(name).and_then(|entry| entry.slot.snapshot())
    }

    /// Check whether workers are currently running.
    pub fn is_running(&self) -> bool {
        !self.workers.is_empty()
    }

    /// Spawn a worker thread for every registered job.
    ///
    /// Each worker runs its job immediately, then on its own interval.
    /// Calling this while already started is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn a worker thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn start_all(&mut self) {
        if self.is_running() {
            return;
        }

        for (name, entry) in &self.entries {
            let (stop_tx, stop_rx) = bounded::<()>(1);
            let job = Arc::clone(&entry.job);
            let slot = Arc::clone(&entry.slot);
            let interval = entry.interval;
            let job_name = name.clone();

            // Detached on purpose: stop_all must not wait for a run
            // that is blocked on external I/O.
            let _ = thread::Builder::new()
                .name(format!("carousel-job-{name}"))
                .spawn(move || {
                    Self::run_loop(&job_name, job.as_ref(), &slot, &stop_rx, interval);
                })
                .expect("Failed to spawn job worker thread");

            self.workers.push(JobWorker { stop_tx });
        }
    }

    /// Stop all workers.
    ///
    /// Cancels pending scheduled runs only: a worker waiting out its
    /// interval wakes and exits without running again, while a worker
    /// inside `run()` finishes, still publishes its result, and exits
    /// afterward. Does not block; idempotent.
    pub fn stop_all(&mut self) {
        for worker in self.workers.drain(..) {
            // Dropping the sender disconnects the shutdown channel,
            // which the worker treats as the stop signal.
            drop(worker.stop_tx);
        }
    }

    /// Worker loop: run, publish, wait out the interval, repeat.
    fn run_loop(
        name: &str,
        job: &dyn Job,
        slot: &DataSlot,
        stop_rx: &Receiver<()>,
        interval: Duration,
    ) {
        loop {
            match job.run() {
                Ok(value) => slot.publish(value),
                // Best-effort: keep the stale cache, no retry, no backoff.
                Err(err) => log::warn!("job '{name}' failed: {err}"),
            }

            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

impl std::fmt::Debug for JobRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRunner")
            .field("jobs", &self.entries.len())
            .field("running", &self.is_running())
            .finish()
    }
}
