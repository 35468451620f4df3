//! Deadlines and bounded execution.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use core_types::{RubyError, RubyResult};

use crate::timer;

/// Granularity of the cooperative sleep loop.
const SLEEP_SLICE: Duration = Duration::from_millis(1);

/// A live execution bound, checked cooperatively at safe points.
///
/// A deadline carries its own expiry flag plus the flags of every enclosing
/// deadline, so an outer timeout firing is observed inside a nested bound
/// without any re-raising machinery. Expiry is only delivered at safe
/// points (`check`, `sleep`); code that never reaches one runs to
/// completion and keeps its result.
pub struct Deadline {
    // Innermost last; `expired` answers true if any level fired.
    flags: Vec<Arc<AtomicBool>>,
    at: Instant,
}

impl Deadline {
    /// True if this deadline or any enclosing one has fired.
    pub fn expired(&self) -> bool {
        self.flags.iter().any(|f| f.load(Ordering::Acquire))
    }

    /// Safe point: fails with a `Timeout::Error` once expired.
    pub fn check(&self) -> RubyResult<()> {
        if self.expired() {
            Err(RubyError::timeout("execution expired"))
        } else {
            Ok(())
        }
    }

    /// Time left before this deadline's own limit, zero once past it.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Sleeps for `duration`, waking early with a `Timeout::Error` if any
    /// enclosing deadline fires first.
    pub fn sleep(&self, duration: Duration) -> RubyResult<()> {
        let wake = Instant::now() + duration;
        loop {
            self.check()?;
            let now = Instant::now();
            if now >= wake {
                return Ok(());
            }
            std::thread::sleep(wake.saturating_duration_since(now).min(SLEEP_SLICE));
        }
    }

    /// Runs `f` under an additional, nested bound.
    ///
    /// The nested deadline observes this one too: whichever limit is
    /// reached first fires at the next safe point inside `f`.
    pub fn run_bounded<T, F>(&self, limit: Duration, f: F) -> RubyResult<T>
    where
        F: FnOnce(&Deadline) -> RubyResult<T>,
    {
        bounded(&self.flags, limit, f)
    }
}

impl std::fmt::Debug for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deadline")
            .field("depth", &self.flags.len())
            .field("expired", &self.expired())
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// Runs `f` with a fresh deadline `limit` from now.
///
/// The timer thread sets the deadline's flag when the limit passes; `f`
/// observes it at its next safe point and unwinds with a `Timeout::Error`
/// through the ordinary error path. When `f` finishes (either way) the
/// deadline is torn down: its timer entry is disarmed and reclaimed by the
/// timer thread no later than its original due time.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use timeout::run_bounded;
///
/// let out = run_bounded(Duration::from_millis(50), |deadline| {
///     deadline.check()?;
///     Ok(21 * 2)
/// });
/// assert_eq!(out.unwrap(), 42);
/// ```
pub fn run_bounded<T, F>(limit: Duration, f: F) -> RubyResult<T>
where
    F: FnOnce(&Deadline) -> RubyResult<T>,
{
    bounded(&[], limit, f)
}

fn bounded<T, F>(parents: &[Arc<AtomicBool>], limit: Duration, f: F) -> RubyResult<T>
where
    F: FnOnce(&Deadline) -> RubyResult<T>,
{
    let flag = Arc::new(AtomicBool::new(false));
    let at = Instant::now() + limit;
    timer::TIMER.register(at, Arc::downgrade(&flag));

    let mut flags = parents.to_vec();
    flags.push(flag);
    let deadline = Deadline { flags, at };
    f(&deadline)
    // Dropping the deadline here drops the last strong reference to its
    // flag, turning the timer entry into a dead weak the thread discards.
}

/// Number of armed timer entries, exposed for leak diagnostics.
pub fn pending_timers() -> usize {
    timer::TIMER.pending()
}
