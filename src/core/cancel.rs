//! One-shot cancellation broadcast.
//!
//! The signal is a crossbeam channel that never carries a message. Its only
//! sender is dropped exactly once when the signal fires, which disconnects the
//! channel and wakes every receiver blocked in a `select!` at the same time.
//! An atomic flag mirrors the state so loops can check it without touching the
//! channel.

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;

/// Idempotent, permanent "stop taking new work" signal shared by one run.
#[derive(Debug)]
pub struct CancelSignal {
    /// Dropping the sender is the broadcast. `None` once fired.
    tx: Mutex<Option<Sender<()>>>,
    rx: Receiver<()>,
    fired: AtomicBool,
}

impl CancelSignal {
    /// Create an unfired signal.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            tx: Mutex::new(Some(tx)),
            rx,
            fired: AtomicBool::new(false),
        }
    }

    /// Fire the signal.
    ///
    /// Returns `true` only for the call that performed the transition; every
    /// later or concurrent call is a no-op returning `false`.
    pub fn fire(&self) -> bool {
        let mut slot = self.tx.lock();
        match slot.take() {
            Some(tx) => {
                self.fired.store(true, Ordering::Release);
                drop(tx);
                true
            }
            None => false,
        }
    }

    /// Whether the signal has fired.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Receiver that becomes ready (disconnected) once the signal fires.
    /// Intended for use as an arm of `crossbeam_channel::select!`.
    #[must_use]
    pub fn listener(&self) -> Receiver<()> {
        self.rx.clone()
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}
