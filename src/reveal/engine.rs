//! RevealEngine: Per-sink registry of paced reveal jobs.
//!
//! Every running job owns a dedicated pacer thread that sleeps one interval
//! between steps. The sleep is a `recv_timeout` on a wake channel, so
//! cancelling a job interrupts its pending step immediately instead of
//! waiting out the interval.
//!
//! # Cancellation
//!
//! The pacer performs each step while holding the sink lock and re-checks
//! its cancellation flag under that lock. `cancel` flips the flag, wakes the
//! pacer and joins it, so once `cancel` returns the job can no longer write.

use super::job::RevealJob;
use super::sink::{SharedSink, SinkId};
use super::RevealOptions;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Lifecycle of a reveal job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum JobState {
    /// No job is bound.
    Idle = 0,
    /// Steps are still scheduled.
    Running = 1,
    /// The cursor reached the end of the token stream.
    Completed = 2,
    /// Superseded, reset or explicitly cancelled.
    Cancelled = 3,
}

impl JobState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Completed,
            3 => Self::Cancelled,
            _ => Self::Idle,
        }
    }
}

/// State shared between a job's pacer thread and its handles.
#[derive(Debug)]
struct JobControl {
    state: AtomicU8,
}

impl JobControl {
    const fn running() -> Self {
        Self {
            state: AtomicU8::new(JobState::Running as u8),
        }
    }

    fn state(&self) -> JobState {
        JobState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn is_cancelled(&self) -> bool {
        self.state() == JobState::Cancelled
    }

    /// Move from `from` to `to`; returns `false` if the job was elsewhere.
    fn transition(&self, from: JobState, to: JobState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Observer for one reveal job.
#[derive(Debug, Clone)]
pub struct JobHandle {
    /// Engine-unique job number, for logs.
    id: u64,
    control: Arc<JobControl>,
    /// Disconnects when the pacer exits.
    done: Receiver<()>,
}

impl JobHandle {
    /// Current lifecycle state.
    pub fn state(&self) -> JobState {
        self.control.state()
    }

    /// Block until the job stops running, or until `timeout` elapses.
    ///
    /// Returns the state observed afterwards.
    pub fn wait(&self, timeout: Option<Duration>) -> JobState {
        match timeout {
            None => {
                let _ = self.done.recv();
            }
            Some(timeout) => {
                let _ = self.done.recv_timeout(timeout);
            }
        }
        self.state()
    }
}

/// Registry entry for the job bound to a sink.
struct ActiveJob {
    handle: JobHandle,
    wake: Sender<()>,
    pacer: Option<JoinHandle<()>>,
}

impl ActiveJob {
    /// Invalidate the pending step and wait for the pacer to exit.
    fn cancel(mut self, sink_id: &SinkId) {
        if self
            .handle
            .control
            .transition(JobState::Running, JobState::Cancelled)
        {
            debug!(sink = %sink_id, job = self.handle.id, "reveal cancelled");
        }

        let _ = self.wake.try_send(());

        if let Some(pacer) = self.pacer.take() {
            if pacer.thread().id() != thread::current().id() {
                let _ = pacer.join();
            }
        }
    }
}

/// Registry that keeps at most one running reveal per sink.
pub struct RevealEngine {
    /// Options applied to every job.
    options: RevealOptions,
    /// Bound jobs by sink.
    jobs: Mutex<HashMap<SinkId, ActiveJob>>,
    /// Next job number.
    next_id: AtomicU64,
}

impl RevealEngine {
    /// Create an engine with no bound jobs.
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            jobs: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Options applied to every job.
    pub const fn options(&self) -> RevealOptions {
        self.options
    }

    /// Start revealing `text` into `sink`, one character per `interval`.
    ///
    /// Any job already bound to `sink_id` is cancelled first. The first
    /// step runs before this returns; the rest run on a pacer thread.
    pub fn start(
        &self,
        sink_id: SinkId,
        sink: SharedSink,
        text: &str,
        interval: Duration,
    ) -> JobHandle {
        let mut jobs = lock(&self.jobs);
        if let Some(previous) = jobs.remove(&sink_id) {
            previous.cancel(&sink_id);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let control = Arc::new(JobControl::running());
        let (done_tx, done_rx) = bounded::<()>(0);
        let (wake_tx, wake_rx) = bounded::<()>(1);

        let mut job = RevealJob::new(text, self.options);
        debug!(
            sink = %sink_id,
            job = id,
            tokens = job.tokens().len(),
            interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            "reveal started"
        );

        job.step(&mut *lock(&sink));

        let pacer = if job.is_finished() {
            control.transition(JobState::Running, JobState::Completed);
            debug!(sink = %sink_id, job = id, "reveal completed");
            None
        } else {
            Self::spawn_pacer(job, &sink, &control, wake_rx, done_tx, interval, &sink_id, id)
        };

        let handle = JobHandle {
            id,
            control,
            done: done_rx,
        };
        jobs.insert(
            sink_id,
            ActiveJob {
                handle: handle.clone(),
                wake: wake_tx,
                pacer,
            },
        );
        handle
    }

    /// Cancel the job bound to `sink_id`, if any.
    ///
    /// Content already shown stays visible. Returns whether a job was bound.
    pub fn cancel(&self, sink_id: &SinkId) -> bool {
        let mut jobs = lock(&self.jobs);
        match jobs.remove(sink_id) {
            Some(job) => {
                job.cancel(sink_id);
                true
            }
            None => false,
        }
    }

    /// Cancel every bound job.
    pub fn reset(&self) {
        let mut jobs = lock(&self.jobs);
        for (sink_id, job) in jobs.drain() {
            job.cancel(&sink_id);
        }
    }

    /// State of the job bound to `sink_id`; `Idle` when none is bound.
    pub fn state(&self, sink_id: &SinkId) -> JobState {
        lock(&self.jobs)
            .get(sink_id)
            .map_or(JobState::Idle, |job| job.handle.state())
    }

    /// Whether a job bound to `sink_id` is still emitting.
    pub fn is_running(&self, sink_id: &SinkId) -> bool {
        self.state(sink_id) == JobState::Running
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_pacer(
        mut job: RevealJob,
        sink: &SharedSink,
        control: &Arc<JobControl>,
        wake: Receiver<()>,
        done: Sender<()>,
        interval: Duration,
        sink_id: &SinkId,
        id: u64,
    ) -> Option<JoinHandle<()>> {
        let spawned = {
            let job = job.clone();
            let sink = Arc::clone(sink);
            let control = Arc::clone(control);
            let sink_id = sink_id.clone();
            thread::Builder::new()
                .name("reveal-pacer".to_string())
                .spawn(move || {
                    Self::run_loop(job, &sink, &control, &wake, interval, &sink_id, id);
                    drop(done);
                })
        };

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                // No thread, no pacing: show the whole text at once.
                warn!(sink = %sink_id, job = id, error = %e, "failed to spawn pacer thread");
                job.finish(&mut *lock(sink));
                control.transition(JobState::Running, JobState::Completed);
                None
            }
        }
    }

    /// Main pacer loop.
    fn run_loop(
        mut job: RevealJob,
        sink: &SharedSink,
        control: &JobControl,
        wake: &Receiver<()>,
        interval: Duration,
        sink_id: &SinkId,
        id: u64,
    ) {
        loop {
            match wake.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                // Woken for cancellation, or the engine is gone
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }

            let mut guard = lock(sink);
            if control.is_cancelled() {
                break;
            }

            let step = job.step(&mut *guard);
            trace!(sink = %sink_id, job = id, cursor = job.cursor(), ?step, "reveal step");

            if job.is_finished() {
                control.transition(JobState::Running, JobState::Completed);
                debug!(sink = %sink_id, job = id, "reveal completed");
                break;
            }
        }
    }
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new(RevealOptions::default())
    }
}

impl Drop for RevealEngine {
    fn drop(&mut self) {
        self.reset();
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
