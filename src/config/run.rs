//! Executor configuration structures.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`RunConfig::worker_count`].
pub const ENV_WORKER_COUNT: &str = "BOUNDED_EXECUTOR_WORKER_COUNT";
/// Environment variable overriding [`RunConfig::error_limit`].
pub const ENV_ERROR_LIMIT: &str = "BOUNDED_EXECUTOR_ERROR_LIMIT";
/// Environment variable overriding [`RunConfig::queue_capacity`].
pub const ENV_QUEUE_CAPACITY: &str = "BOUNDED_EXECUTOR_QUEUE_CAPACITY";

const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
const DEFAULT_THREAD_PREFIX: &str = "bx-worker";

/// Configuration of one executor.
///
/// `error_limit` is kept as given; values below 1 are normalized to 1 when a
/// run starts (see [`RunConfig::normalized_error_limit`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of worker threads, and therefore of concurrently running tasks.
    pub worker_count: usize,
    /// Number of failed tasks that aborts the run.
    pub error_limit: i64,
    /// Capacity of the hand-off queue. `None` means one slot per worker,
    /// `Some(0)` a rendezvous hand-off.
    pub queue_capacity: Option<usize>,
    /// Stack size of each spawned thread, in bytes.
    pub thread_stack_size: usize,
    /// Prefix of spawned thread names.
    pub thread_name_prefix: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            worker_count: num_cpus::get(),
            error_limit: 1,
            queue_capacity: None,
            thread_stack_size: DEFAULT_STACK_SIZE,
            thread_name_prefix: DEFAULT_THREAD_PREFIX.to_string(),
        }
    }
}

impl RunConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count.
    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the error limit.
    #[must_use]
    pub const fn with_error_limit(mut self, error_limit: i64) -> Self {
        self.error_limit = error_limit;
        self
    }

    /// Set the hand-off queue capacity.
    #[must_use]
    pub const fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Set the stack size of spawned threads.
    #[must_use]
    pub const fn with_thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = bytes;
        self
    }

    /// Set the thread name prefix.
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Error limit with anything below 1 treated as 1 (abort on first failure).
    #[must_use]
    pub fn normalized_error_limit(&self) -> usize {
        usize::try_from(self.error_limit.max(1)).unwrap_or(usize::MAX)
    }

    /// Effective capacity of the hand-off queue.
    #[must_use]
    pub fn effective_queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(self.worker_count)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("worker_count must be greater than 0".into());
        }
        if self.thread_stack_size == 0 {
            return Err("thread_stack_size must be greater than 0".into());
        }
        if self.thread_name_prefix.is_empty() {
            return Err("thread_name_prefix must not be empty".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, loading a `.env` file
    /// first if one exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(value) = parse_var(&lookup, ENV_WORKER_COUNT)? {
            cfg.worker_count = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_ERROR_LIMIT)? {
            cfg.error_limit = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_QUEUE_CAPACITY)? {
            cfg.queue_capacity = Some(value);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| format!("{key}: cannot parse `{raw}`: {e}"))
        })
        .transpose()
}
