//! Tokio adapter.
//!
//! A run blocks its calling thread until every worker is joined, so async
//! callers hand it to tokio's blocking pool instead of stalling a runtime worker.

use tracing::error;

use crate::config::RunConfig;
use crate::core::{Executor, RunError, Task};

/// Async counterpart of [`crate::run`].
///
/// # Errors
///
/// Same as [`crate::run`], plus [`RunError::Internal`] if the blocking task
/// could not be joined.
pub async fn run_async(
    tasks: Vec<Task>,
    worker_count: usize,
    error_limit: i64,
) -> Result<(), RunError> {
    let config = RunConfig::new()
        .with_worker_count(worker_count)
        .with_error_limit(error_limit);
    Executor::new(config)?.execute_async(tasks).await
}

impl Executor {
    /// Run `tasks` on tokio's blocking thread pool and await the outcome.
    ///
    /// # Errors
    ///
    /// Same as [`Executor::execute`], plus [`RunError::Internal`] if the
    /// blocking task could not be joined.
    pub async fn execute_async(&self, tasks: Vec<Task>) -> Result<(), RunError> {
        let executor = self.clone();
        tokio::task::spawn_blocking(move || executor.execute(tasks))
            .await
            .map_err(|e| {
                error!(error = %e, "Blocking run task failed to join");
                RunError::Internal(format!("blocking run join failed: {e}"))
            })?
    }
}
