//! Runtime adapters for calling the executor from async code.

#[cfg(feature = "tokio-runtime")]
pub mod tokio_runtime;

#[cfg(feature = "tokio-runtime")]
pub use tokio_runtime::run_async;
