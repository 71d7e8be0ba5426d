//! # Bounded Executor
//!
//! Run a list of independent, fallible tasks on a fixed number of worker
//! threads, and stop early once too many of them have failed.
//!
//! ## Contract
//!
//! [`run`] takes an ordered list of [`Task`]s, a worker count `n` and an error
//! limit `m`:
//!
//! - at most `n` tasks execute at the same time, on dedicated OS threads
//! - tasks are handed out in submission order; completion order is unspecified
//! - once `m` tasks have failed, no further task is started and the call
//!   returns [`RunError::ErrorsLimitExceeded`]
//! - an error limit below 1 means "abort on the first failure"
//! - tasks that are already running when the limit is hit finish normally
//! - the call returns only after the producer and every worker have exited
//!
//! Individual task errors are logged and counted, never returned.
//!
//! ```
//! use bounded_executor::{run, RunError, Task};
//!
//! let tasks: Vec<Task> = (0..10)
//!     .map(|i| Task::new(move || if i == 3 { anyhow::bail!("task {i} failed") } else { Ok(()) }))
//!     .collect();
//!
//! // One failure is tolerated with a limit of 2.
//! assert_eq!(run(tasks, 4, 2), Ok(()));
//!
//! let failing: Vec<Task> = (0..10).map(|_| Task::new(|| anyhow::bail!("nope"))).collect();
//! assert_eq!(run(failing, 4, 2), Err(RunError::ErrorsLimitExceeded));
//! ```
//!
//! ## Executor
//!
//! For repeated runs, named logging, queue sizing or aggregate statistics, build
//! an [`Executor`] from a [`RunConfig`] (or with [`builders::ExecutorBuilder`]) and
//! call [`Executor::execute`] or [`Executor::execute_with_report`].
//!
//! ## Async callers
//!
//! With the default `tokio-runtime` feature, [`runtime::run_async`] and
//! `Executor::execute_async` move the blocking run onto tokio's blocking pool.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core execution abstractions.
pub mod core;
/// Configuration models for executors.
pub mod config;
/// Builders to construct executors from configuration.
pub mod builders;
/// Runtime adapters for async callers.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::config::RunConfig;
pub use crate::core::{
    AppResult, CancelSignal, Executor, Outcome, RunError, RunReport, RunStats, Task, TaskResult,
};

/// Run `tasks` on `worker_count` threads, aborting once `error_limit` tasks fail.
///
/// Blocks until every spawned thread has terminated, on success and on abort.
///
/// # Errors
///
/// - [`RunError::ErrorsLimitExceeded`] if `error_limit` tasks failed
///   (an `error_limit` below 1 is treated as 1)
/// - [`RunError::InvalidConfig`] if `worker_count` is zero
/// - [`RunError::Internal`] if a thread could not be spawned
pub fn run(tasks: Vec<Task>, worker_count: usize, error_limit: i64) -> Result<(), RunError> {
    let config = RunConfig::new()
        .with_worker_count(worker_count)
        .with_error_limit(error_limit);
    Executor::new(config)?.execute(tasks)
}
