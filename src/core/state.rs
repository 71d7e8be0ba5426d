//! Per-run shared state: failure ledger, cancellation and counters.

use parking_lot::Mutex;
use tracing::warn;

use super::cancel::CancelSignal;
use super::worker_pool::RunCounters;

/// State shared by the producer and all workers of a single run.
///
/// Created fresh for every run and dropped when it returns.
#[derive(Debug)]
pub(crate) struct RunState {
    failures: Mutex<usize>,
    error_limit: usize,
    pub cancel: CancelSignal,
    pub counters: RunCounters,
}

impl RunState {
    /// `error_limit` must already be normalized (at least 1).
    pub fn new(error_limit: usize) -> Self {
        debug_assert!(error_limit >= 1);
        Self {
            failures: Mutex::new(0),
            error_limit,
            cancel: CancelSignal::new(),
            counters: RunCounters::default(),
        }
    }

    /// Record one failed task.
    ///
    /// Failures arriving after the limit was reached are still counted, but
    /// cancellation only fires on the transition into the limit. Returns `true`
    /// if this call fired cancellation.
    pub fn record_failure(&self) -> bool {
        let mut failures = self.failures.lock();
        *failures += 1;
        if *failures >= self.error_limit && self.cancel.fire() {
            warn!(
                failures = *failures,
                error_limit = self.error_limit,
                "Error limit reached, cancelling remaining tasks"
            );
            return true;
        }
        false
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> usize {
        *self.failures.lock()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_fired()
    }

    /// Whether the failure count reached the limit.
    pub fn limit_exceeded(&self) -> bool {
        self.failures() >= self.error_limit
    }
}
