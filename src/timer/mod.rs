// Author: Dustin Pilgrim
// License: MIT

pub mod local;
pub mod manual;

use std::time::Duration;

pub use self::local::LocalTimers;
pub use self::manual::ManualTimers;

pub type TimerCallback = Box<dyn FnOnce()>;

/// Opaque handle for one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub(crate) u64);

/// Wall-clock timer service.
///
/// Contract:
/// - `schedule_after` never runs the callback before returning; the fire is
///   queued on the host event loop.
/// - after `cancel(handle)` the callback for `handle` never runs.
/// - cancelling an unknown, already-fired or already-cancelled handle is a no-op.
pub trait TimerService {
    fn schedule_after(&self, after: Duration, callback: TimerCallback) -> TimerHandle;
    fn cancel(&self, handle: TimerHandle);
}
