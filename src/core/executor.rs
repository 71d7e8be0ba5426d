//! The bounded executor: run a task list on a fixed number of workers and
//! abort once too many tasks have failed.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::config::RunConfig;

use super::error::RunError;
use super::state::RunState;
use super::task::Task;
use super::worker_pool::{RunStats, WorkerPool};

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every submitted task was processed and fewer than the limit failed.
    Success,
    /// The error limit was reached and remaining work was abandoned.
    ErrorsLimitExceeded,
}

/// Result of a run together with its aggregate statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// How the run ended.
    pub outcome: Outcome,
    /// Aggregate counters collected during the run.
    pub stats: RunStats,
}

impl RunReport {
    /// Map the report onto the plain run contract.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ErrorsLimitExceeded`] if the error limit was reached.
    pub fn into_result(self) -> Result<(), RunError> {
        match self.outcome {
            Outcome::Success => Ok(()),
            Outcome::ErrorsLimitExceeded => Err(RunError::ErrorsLimitExceeded),
        }
    }
}

/// Runs task lists with bounded parallelism and an error threshold.
///
/// An `Executor` holds configuration only; every call to [`Executor::execute`]
/// spawns fresh threads and fresh shared state, and joins all of them before
/// returning.
///
/// # Example
///
/// ```
/// use bounded_executor::{Executor, RunConfig, RunError, Task};
///
/// let executor = Executor::new(RunConfig::new().with_worker_count(2).with_error_limit(1))?;
///
/// let tasks = vec![
///     Task::new(|| Ok(())),
///     Task::new(|| Err(anyhow::anyhow!("disk full"))),
/// ];
///
/// assert_eq!(executor.execute(tasks), Err(RunError::ErrorsLimitExceeded));
/// # Ok::<(), RunError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    name: String,
    config: RunConfig,
}

impl Executor {
    /// Create an executor from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::InvalidConfig`] if the configuration is invalid,
    /// notably when `worker_count` is zero.
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        Self::named("executor", config)
    }

    /// Create an executor with a name used in log output.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::InvalidConfig`] if the configuration is invalid.
    pub fn named(name: impl Into<String>, config: RunConfig) -> Result<Self, RunError> {
        config.validate().map_err(RunError::InvalidConfig)?;
        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Name of this executor.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration of this executor.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run `tasks` and block until every thread of the run has terminated.
    ///
    /// # Errors
    ///
    /// - [`RunError::ErrorsLimitExceeded`] if the error limit was reached
    /// - [`RunError::Internal`] if a thread could not be spawned or panicked
    pub fn execute(&self, tasks: Vec<Task>) -> Result<(), RunError> {
        self.execute_with_report(tasks)?.into_result()
    }

    /// Run `tasks` like [`Executor::execute`], returning the outcome with
    /// aggregate statistics instead of mapping it to an error.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Internal`] if a thread could not be spawned or panicked.
    pub fn execute_with_report(&self, tasks: Vec<Task>) -> Result<RunReport, RunError> {
        let error_limit = self.config.normalized_error_limit();
        let worker_count = self.config.worker_count;
        let task_count = tasks.len();

        let span = info_span!(
            "run",
            run_id = %Uuid::new_v4(),
            executor = %self.name,
            workers = worker_count,
            error_limit = error_limit,
        );
        let _entered = span.enter();
        let started_at = Instant::now();
        info!(tasks = task_count, "Run started");

        let state = Arc::new(RunState::new(error_limit));
        WorkerPool::start(&self.config, tasks, &state, &span)?.join()?;

        let outcome = if state.limit_exceeded() {
            Outcome::ErrorsLimitExceeded
        } else {
            Outcome::Success
        };
        let stats = state.counters.snapshot(worker_count);
        debug_assert_eq!(stats.live_routines, 0);

        info!(
            outcome = ?outcome,
            submitted = stats.submitted,
            started = stats.started,
            failed = stats.failed,
            abandoned = stats.abandoned,
            elapsed_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Run completed"
        );
        if outcome == Outcome::ErrorsLimitExceeded {
            debug!(
                not_submitted = task_count as u64 - stats.submitted,
                "Tasks left unsubmitted after cancellation"
            );
        }

        Ok(RunReport { outcome, stats })
    }
}
