// Author: Dustin Pilgrim
// License: MIT

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::{TimerCallback, TimerHandle, TimerService};

#[derive(Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    // (deadline, id) keeps equal deadlines in scheduling order.
    queue: BTreeMap<(Duration, u64), TimerCallback>,
    deadlines: HashMap<u64, Duration>,
}

/// Timer service driven by a virtual clock.
///
/// Nothing fires until the owner advances the clock. Used by `dwell simulate`
/// and by tests that need exact timing.
#[derive(Default)]
pub struct ManualTimers {
    inner: RefCell<Inner>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn now_ms(&self) -> u64 {
        self.now().as_millis() as u64
    }

    /// Number of scheduled, not yet fired or cancelled callbacks.
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Deadline of the earliest pending callback.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.borrow().queue.keys().next().map(|(d, _)| *d)
    }

    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.advance_to(target);
    }

    /// Fires every callback due at or before `target`, in deadline order.
    ///
    /// The clock reads each callback's own deadline while it runs. Callbacks
    /// may schedule or cancel timers; anything they schedule that is due by
    /// `target` fires in the same call. Moving backwards is ignored.
    pub fn advance_to(&self, target: Duration) {
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                let key = match inner.queue.keys().next() {
                    Some(k) if k.0 <= target => *k,
                    _ => break,
                };
                let cb = inner.queue.remove(&key);
                inner.deadlines.remove(&key.1);
                if key.0 > inner.now {
                    inner.now = key.0;
                }
                cb
            };

            if let Some(cb) = due {
                cb();
            }
        }

        let mut inner = self.inner.borrow_mut();
        if target > inner.now {
            inner.now = target;
        }
    }
}

impl TimerService for ManualTimers {
    fn schedule_after(&self, after: Duration, callback: TimerCallback) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id = inner.next_id.wrapping_add(1);
        let id = inner.next_id;
        let deadline = inner.now + after;

        inner.queue.insert((deadline, id), callback);
        inner.deadlines.insert(id, deadline);

        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut inner = self.inner.borrow_mut();
        if let Some(deadline) = inner.deadlines.remove(&handle.0) {
            inner.queue.remove(&(deadline, handle.0));
        }
    }
}
