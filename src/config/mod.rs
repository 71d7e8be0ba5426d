//! Configuration models for the executor.

pub mod run;

pub use run::{RunConfig, ENV_ERROR_LIMIT, ENV_QUEUE_CAPACITY, ENV_WORKER_COUNT};
