// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use crate::core::events::TimerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Schedule a wall-clock timer. When it elapses the runtime must feed
    /// `Event::TimerFired { timer }` back into the manager.
    ArmTimer {
        timer: TimerId,
        after: Duration,
    },

    /// Cancel the timer previously armed under `timer`.
    CancelTimer {
        timer: TimerId,
    },

    /// A dwell interval finished uninterrupted; run the completion callback.
    Complete,
}
