//! The unit of work accepted by the executor.

use std::fmt;

/// Outcome of a single task. Errors are counted by the executor, never returned.
pub type TaskResult = anyhow::Result<()>;

/// A zero-argument operation that either succeeds or fails.
///
/// Tasks are `FnOnce`: the executor runs each one at most once and drops it
/// afterwards. Tasks handed to the queue but never started (because the run was
/// cancelled) are dropped without being called.
///
/// # Example
///
/// ```
/// use bounded_executor::Task;
///
/// let ok = Task::new(|| Ok(()));
/// let failing = Task::new(|| Err(anyhow::anyhow!("boom")));
/// # let _ = (ok, failing);
/// ```
pub struct Task {
    body: Box<dyn FnOnce() -> TaskResult + Send + 'static>,
}

impl Task {
    /// Wrap a closure as a task.
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        Self {
            body: Box::new(body),
        }
    }

    /// Consume the task and run its body on the current thread.
    pub(crate) fn call(self) -> TaskResult {
        (self.body)()
    }
}

impl<F> From<F> for Task
where
    F: FnOnce() -> TaskResult + Send + 'static,
{
    fn from(body: F) -> Self {
        Self::new(body)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}
