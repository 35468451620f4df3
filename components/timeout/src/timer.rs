//! The process-wide timer thread.
//!
//! One background thread serves every armed deadline. Deadlines register a
//! weak handle to their expiry flag; the thread sleeps until the earliest
//! due time, sets the flags of the entries that came due and discards
//! entries whose deadline was torn down in the meantime. Abandoned entries
//! are popped no later than their original due time, so the queue never
//! grows past the number of deadlines armed within one timeout window.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Weak;
use std::time::Instant;

use once_cell::sync::Lazy;
use parking_lot::{Condvar, Mutex};

/// Queue length above which the thread sweeps out torn-down entries.
const PRUNE_THRESHOLD: usize = 512;

pub(crate) static TIMER: Lazy<Timer> = Lazy::new(|| {
    std::thread::spawn(|| TIMER.run());
    Timer {
        queue: Mutex::new(BinaryHeap::new()),
        wakeup: Condvar::new(),
        seq: AtomicU64::new(0),
    }
});

struct Entry {
    fire_at: Instant,
    seq: u64,
    flag: Weak<AtomicBool>,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.fire_at
            .cmp(&other.fire_at)
            .then(self.seq.cmp(&other.seq))
    }
}

pub(crate) struct Timer {
    queue: Mutex<BinaryHeap<Reverse<Entry>>>,
    wakeup: Condvar,
    seq: AtomicU64,
}

impl Timer {
    /// Arms a timer that sets `flag` at `fire_at`, if the flag still exists.
    pub(crate) fn register(&self, fire_at: Instant, flag: Weak<AtomicBool>) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.queue.lock().push(Reverse(Entry { fire_at, seq, flag }));
        self.wakeup.notify_one();
    }

    /// Number of armed (not yet fired or reclaimed) entries.
    pub(crate) fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    fn run(&self) -> ! {
        let mut queue = self.queue.lock();
        loop {
            let now = Instant::now();
            while queue
                .peek()
                .map(|Reverse(e)| e.fire_at <= now)
                .unwrap_or(false)
            {
                if let Some(Reverse(entry)) = queue.pop() {
                    // A dead weak means the deadline was torn down; nothing
                    // to signal.
                    if let Some(flag) = entry.flag.upgrade() {
                        flag.store(true, Ordering::Release);
                    }
                }
            }
            // Under heavy churn of short bounds, reclaim torn-down entries
            // before their due time so the queue tracks live deadlines.
            if queue.len() > PRUNE_THRESHOLD {
                let drained = std::mem::take(&mut *queue);
                queue.extend(
                    drained
                        .into_iter()
                        .filter(|Reverse(e)| e.flag.strong_count() > 0),
                );
            }
            match queue.peek() {
                Some(Reverse(next)) => {
                    let fire_at = next.fire_at;
                    let _ = self.wakeup.wait_until(&mut queue, fire_at);
                }
                None => self.wakeup.wait(&mut queue),
            }
        }
    }
}
