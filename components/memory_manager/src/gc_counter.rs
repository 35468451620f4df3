//! Process-wide GC cycle counter facade.
//!
//! The counter is monotonically non-decreasing, incremented exactly once per
//! completed collection cycle, and exposed read-only. Reads are plain atomic
//! loads; no lock is held on either side.

use std::sync::atomic::{AtomicU64, Ordering};

static CYCLE_COUNT: AtomicU64 = AtomicU64::new(0);

/// Returns the number of completed collection cycles in this process.
///
/// Safe to call concurrently with collection activity; a read never observes
/// a torn or decreasing value.
pub fn read_cycle_count() -> u64 {
    CYCLE_COUNT.load(Ordering::Acquire)
}

/// Records one completed collection cycle.
///
/// The increment is owned solely by the collector; nothing else in the
/// runtime writes this counter.
pub(crate) fn record_cycle() {
    CYCLE_COUNT.fetch_add(1, Ordering::Release);
}
