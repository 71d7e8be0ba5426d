//! Core execution abstractions: tasks, cancellation, the worker pool and the executor.

pub mod cancel;
pub mod error;
pub mod executor;
pub mod task;
pub mod worker_pool;

pub(crate) mod state;

pub use cancel::CancelSignal;
pub use error::{AppResult, RunError};
pub use executor::{Executor, Outcome, RunReport};
pub use task::{Task, TaskResult};
pub use worker_pool::RunStats;
