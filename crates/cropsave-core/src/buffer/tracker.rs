//! Allocation/release accounting for pixel buffers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    allocated: AtomicUsize,
    released: AtomicUsize,
}

/// Shared counter of buffer allocations and releases.
///
/// Cloning the tracker shares the same counters. Buffers derived from a
/// tracked buffer (resized, rotated, cropped or cloned) are tracked too.
#[derive(Debug, Clone, Default)]
pub struct ReleaseTracker {
    counters: Arc<Counters>,
}

impl ReleaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffers registered with this tracker.
    pub fn allocated(&self) -> usize {
        self.counters.allocated.load(Ordering::SeqCst)
    }

    /// Number of registered buffers that have been dropped.
    pub fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }

    /// Buffers currently alive.
    pub fn live(&self) -> usize {
        self.allocated().saturating_sub(self.released())
    }

    pub(crate) fn on_allocate(&self) {
        self.counters.allocated.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn on_release(&self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}
