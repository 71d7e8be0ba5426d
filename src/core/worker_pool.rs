//! Producer and worker threads for a single run.
//!
//! A run owns one producer thread feeding tasks in submission order into a
//! bounded crossbeam channel, and a fixed number of worker threads draining it.
//! Both sides race every blocking hand-off against the run's cancel signal, so
//! no thread stays blocked once the error limit is hit.
//!
//! # Design
//!
//! - **No polling**: blocking `Select` over the queue and the cancel listener
//! - **Clean shutdown**: dropping the sender closes the queue for all workers
//! - **Join barrier**: every spawned thread is joined before the run returns

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Select, Sender};
use tracing::{debug, error, warn, Span};

use crate::config::RunConfig;
use crate::core::error::RunError;
use crate::core::state::RunState;
use crate::core::task::Task;

/// Aggregate statistics of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of worker threads started.
    pub worker_count: usize,

    /// Tasks handed to the queue by the producer.
    pub submitted: u64,

    /// Tasks whose body was invoked.
    pub started: u64,

    /// Tasks that returned `Ok`.
    pub succeeded: u64,

    /// Tasks that returned `Err` or panicked.
    pub failed: u64,

    /// Subset of `failed` that panicked.
    pub panicked: u64,

    /// Tasks taken off the queue after cancellation and dropped unexecuted.
    pub abandoned: u64,

    /// Producer and worker threads still alive. Zero once a run has returned.
    pub live_routines: u64,
}

/// Internal counters for run statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct RunCounters {
    pub submitted: AtomicU64,
    pub started: AtomicU64,
    pub succeeded: AtomicU64,
    pub failed: AtomicU64,
    pub panicked: AtomicU64,
    pub abandoned: AtomicU64,
    pub live_routines: AtomicU64,
}

impl RunCounters {
    /// Get a snapshot of current statistics.
    pub fn snapshot(&self, worker_count: usize) -> RunStats {
        RunStats {
            worker_count,
            submitted: self.submitted.load(Ordering::Acquire),
            started: self.started.load(Ordering::Acquire),
            succeeded: self.succeeded.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            panicked: self.panicked.load(Ordering::Acquire),
            abandoned: self.abandoned.load(Ordering::Acquire),
            live_routines: self.live_routines.load(Ordering::Acquire),
        }
    }
}

/// Marks a routine as alive for as long as it exists.
///
/// Dropped on every exit path of a thread body, including early returns on
/// cancellation and unwinding.
struct LiveGuard {
    state: Arc<RunState>,
}

impl LiveGuard {
    fn enter(state: &Arc<RunState>) -> Self {
        state.counters.live_routines.fetch_add(1, Ordering::AcqRel);
        Self {
            state: Arc::clone(state),
        }
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.state.counters.live_routines.fetch_sub(1, Ordering::AcqRel);
    }
}

/// The threads of one run, ready to be joined.
pub(crate) struct WorkerPool {
    handles: Vec<(String, JoinHandle<()>)>,
    state: Arc<RunState>,
}

impl WorkerPool {
    /// Start `config.worker_count` workers, then the producer.
    ///
    /// If any thread fails to spawn, the run is cancelled, the threads already
    /// running are joined, and the spawn error is returned.
    pub fn start(
        config: &RunConfig,
        tasks: Vec<Task>,
        state: &Arc<RunState>,
        span: &Span,
    ) -> Result<Self, RunError> {
        let (task_tx, task_rx) = bounded::<Task>(config.effective_queue_capacity());
        let mut pool = Self {
            handles: Vec::with_capacity(config.worker_count + 1),
            state: Arc::clone(state),
        };

        for worker_id in 0..config.worker_count {
            let name = format!("{}-{worker_id}", config.thread_name_prefix);
            let spawned = spawn_worker(
                worker_id,
                name.clone(),
                config.thread_stack_size,
                task_rx.clone(),
                Arc::clone(state),
                span.clone(),
            );
            match spawned {
                Ok(handle) => pool.handles.push((name, handle)),
                Err(e) => {
                    drop(task_tx);
                    return Err(pool.abort(format!("failed to spawn {name}: {e}")));
                }
            }
        }
        drop(task_rx);

        let name = format!("{}-producer", config.thread_name_prefix);
        match spawn_producer(
            name.clone(),
            config.thread_stack_size,
            tasks,
            task_tx,
            Arc::clone(state),
            span.clone(),
        ) {
            Ok(handle) => pool.handles.push((name, handle)),
            // The closure owning the sender is dropped with the error, which
            // closes the queue for the workers.
            Err(e) => return Err(pool.abort(format!("failed to spawn {name}: {e}"))),
        }

        Ok(pool)
    }

    /// Wait for every thread of the run to terminate.
    ///
    /// All threads are joined even if one of them panicked. Tasks submitted
    /// but never received by a worker are counted as abandoned; they are
    /// dropped together with the channel.
    pub fn join(self) -> Result<(), RunError> {
        let mut panicked = Vec::new();
        for (name, handle) in self.handles {
            if handle.join().is_err() {
                error!(thread = %name, "Executor thread panicked");
                panicked.push(name);
            }
        }

        // Every submitted task was either received by a worker (started or
        // abandoned there) or is still sitting in the queue.
        let counters = &self.state.counters;
        let leftover = counters
            .submitted
            .load(Ordering::Acquire)
            .saturating_sub(counters.started.load(Ordering::Acquire))
            .saturating_sub(counters.abandoned.load(Ordering::Acquire));
        if leftover > 0 {
            self.state
                .counters
                .abandoned
                .fetch_add(leftover, Ordering::AcqRel);
            debug!(abandoned = leftover, "Dropped tasks left in the queue");
        }
        if panicked.is_empty() {
            Ok(())
        } else {
            Err(RunError::Internal(format!(
                "threads panicked: {}",
                panicked.join(", ")
            )))
        }
    }

    fn abort(self, reason: String) -> RunError {
        error!(reason = %reason, "Aborting run during startup");
        self.state.cancel.fire();
        if let Err(e) = self.join() {
            warn!(error = %e, "Startup cleanup observed a panicked thread");
        }
        RunError::Internal(reason)
    }
}

fn spawn_worker(
    worker_id: usize,
    name: String,
    stack_size: usize,
    task_rx: Receiver<Task>,
    state: Arc<RunState>,
    span: Span,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(name)
        .stack_size(stack_size)
        .spawn(move || {
            let _entered = span.enter();
            let _live = LiveGuard::enter(&state);
            let cancelled = state.cancel.listener();
            let mut sel = Select::new();
            let task_op = sel.recv(&task_rx);
            sel.recv(&cancelled);
            debug!(worker_id = worker_id, "Worker thread started");

            loop {
                if state.is_cancelled() {
                    debug!(worker_id = worker_id, "Worker observed cancellation, exiting");
                    break;
                }

                let oper = sel.select();
                let task = if oper.index() == task_op {
                    if let Ok(task) = oper.recv(&task_rx) {
                        task
                    } else {
                        debug!(worker_id = worker_id, "Task queue closed, exiting");
                        break;
                    }
                } else {
                    let _ = oper.recv(&cancelled);
                    debug!(worker_id = worker_id, "Cancelled while waiting, exiting");
                    break;
                };

                // Select picks arbitrarily when both operations are ready.
                if state.is_cancelled() {
                    state.counters.abandoned.fetch_add(1, Ordering::AcqRel);
                    debug!(worker_id = worker_id, "Dropping task received after cancellation");
                    break;
                }

                run_task(worker_id, task, &state);
            }

            debug!(worker_id = worker_id, "Worker thread exiting");
        })
}

fn run_task(worker_id: usize, task: Task, state: &RunState) {
    state.counters.started.fetch_add(1, Ordering::AcqRel);

    let failed = match panic::catch_unwind(AssertUnwindSafe(|| task.call())) {
        Ok(Ok(())) => false,
        Ok(Err(e)) => {
            debug!(worker_id = worker_id, error = %e, "Task failed");
            true
        }
        Err(_) => {
            warn!(worker_id = worker_id, "Task panicked, counting as failure");
            state.counters.panicked.fetch_add(1, Ordering::AcqRel);
            true
        }
    };

    if failed {
        state.counters.failed.fetch_add(1, Ordering::AcqRel);
        state.record_failure();
    } else {
        state.counters.succeeded.fetch_add(1, Ordering::AcqRel);
    }
}

fn spawn_producer(
    name: String,
    stack_size: usize,
    tasks: Vec<Task>,
    task_tx: Sender<Task>,
    state: Arc<RunState>,
    span: Span,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(name)
        .stack_size(stack_size)
        .spawn(move || {
            let _entered = span.enter();
            let _live = LiveGuard::enter(&state);
            let cancelled = state.cancel.listener();
            let total = tasks.len();
            debug!(tasks = total, "Producer started");

            let mut sel = Select::new();
            let send_op = sel.send(&task_tx);
            sel.recv(&cancelled);

            for (index, task) in tasks.into_iter().enumerate() {
                if state.is_cancelled() {
                    debug!(index = index, total = total, "Producer observed cancellation");
                    break;
                }
                let oper = sel.select();
                if oper.index() == send_op {
                    if oper.send(&task_tx, task).is_err() {
                        // Every worker is gone; nobody will take more work.
                        debug!(index = index, "Task queue disconnected");
                        break;
                    }
                    state.counters.submitted.fetch_add(1, Ordering::AcqRel);
                } else {
                    let _ = oper.recv(&cancelled);
                    debug!(index = index, total = total, "Producer cancelled while submitting");
                    break;
                }
            }

            drop(sel);
            drop(task_tx);
            debug!("Producer exiting, task queue closed");
        })
}
