//! ## kaka-core::alloc::stats
//! **Arena allocation statistics**
//!
//! Counters kept per arena so diagnostics can report how much of the
//! request budget a worker actually uses.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Allocation statistics for one [`RequestArena`](crate::RequestArena).
///
/// Counters are atomics so a snapshot can be read through a shared reference
/// while the owning worker keeps allocating.
#[derive(Debug, Default)]
pub struct ArenaStats {
    allocations: AtomicUsize,
    bytes_allocated: AtomicUsize,
    peak_used: AtomicUsize,
    failures: AtomicUsize,
    resets: AtomicUsize,
}

impl ArenaStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successful allocation of `bytes`, leaving `used` in the region.
    #[inline]
    pub(crate) fn record_allocation(&self, bytes: usize, used: usize) {
        self.allocations.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated.fetch_add(bytes, Ordering::Relaxed);
        self.peak_used.fetch_max(used, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn increment_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn increment_resets(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    /// Total bytes handed out over the arena's lifetime, across resets.
    pub fn bytes_allocated(&self) -> usize {
        self.bytes_allocated.load(Ordering::Relaxed)
    }

    /// Largest amount of the region in use at once.
    pub fn peak_used(&self) -> usize {
        self.peak_used.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::Relaxed)
    }
}
