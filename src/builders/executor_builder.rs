//! Fluent construction of a named [`Executor`].

use crate::config::RunConfig;
use crate::core::{Executor, RunError};

/// Builder for an [`Executor`] with a name used in log output.
#[derive(Debug, Clone)]
pub struct ExecutorBuilder {
    name: String,
    config: RunConfig,
    /// Thread name prefix chosen by the caller; the executor name otherwise.
    thread_name_prefix: Option<String>,
}

impl ExecutorBuilder {
    /// Start building an executor called `name` with default configuration.
    ///
    /// Threads are named after the executor unless
    /// [`ExecutorBuilder::thread_name_prefix`] is called.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: RunConfig::default(),
            thread_name_prefix: None,
        }
    }

    /// Start building from an existing configuration, keeping its thread
    /// name prefix.
    pub fn from_config(name: impl Into<String>, config: RunConfig) -> Self {
        Self {
            name: name.into(),
            thread_name_prefix: Some(config.thread_name_prefix.clone()),
            config,
        }
    }

    /// Name of the executor being built.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration collected so far.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Number of worker threads.
    #[must_use]
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.config = self.config.with_worker_count(worker_count);
        self
    }

    /// Failed-task threshold; values below 1 mean "abort on first failure".
    #[must_use]
    pub fn error_limit(mut self, error_limit: i64) -> Self {
        self.config = self.config.with_error_limit(error_limit);
        self
    }

    /// Capacity of the hand-off queue.
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_queue_capacity(capacity);
        self
    }

    /// Stack size of spawned threads, in bytes.
    #[must_use]
    pub fn thread_stack_size(mut self, bytes: usize) -> Self {
        self.config = self.config.with_thread_stack_size(bytes);
        self
    }

    /// Prefix of spawned thread names.
    #[must_use]
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = Some(prefix.into());
        self
    }

    /// Validate the configuration and build the executor.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::InvalidConfig`] if the configuration is invalid.
    pub fn build(self) -> Result<Executor, RunError> {
        let prefix = self.thread_name_prefix.unwrap_or_else(|| self.name.clone());
        let config = self.config.with_thread_name_prefix(prefix);
        Executor::named(self.name, config)
    }
}
