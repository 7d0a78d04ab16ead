// Author: Dustin Pilgrim
// License: MIT

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::{TimerCallback, TimerHandle, TimerService};

/// Timer service backed by tokio.
///
/// Each timer is a `spawn_local` task that sleeps and then runs its callback,
/// so callbacks execute on the host's `LocalSet`, never inside
/// `schedule_after`. Cancelling aborts the task. Must be used from within a
/// `tokio::task::LocalSet`.
#[derive(Default)]
pub struct LocalTimers {
    next_id: Cell<u64>,
    tasks: Rc<RefCell<HashMap<u64, JoinHandle<()>>>>,
}

impl LocalTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Abort every outstanding timer.
    pub fn abort_all(&self) {
        for (_, handle) in self.tasks.borrow_mut().drain() {
            handle.abort();
        }
    }
}

impl TimerService for LocalTimers {
    fn schedule_after(&self, after: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);

        let tasks = Rc::downgrade(&self.tasks);
        let handle = tokio::task::spawn_local(async move {
            sleep(after).await;

            // Deregister before running so the callback sees an accurate count.
            if let Some(tasks) = tasks.upgrade() {
                tasks.borrow_mut().remove(&id);
            }
            callback();
        });

        self.tasks.borrow_mut().insert(id, handle);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let removed = self.tasks.borrow_mut().remove(&handle.0);
        if let Some(task) = removed {
            task.abort();
        }
    }
}

impl Drop for LocalTimers {
    fn drop(&mut self) {
        self.abort_all();
    }
}
