//! Cooperative cancellation flag shared between the search initiator and the scan thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A one-way cancellation flag.
///
/// Starts out not cancelled and, once cancelled, stays cancelled.
/// Clones share the same flag, so the initiator keeps one clone and hands the other
/// to the background scan.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token cancelled. Calling it again has no effect.
    #[inline]
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
