// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Identifies one armed dwell interval within a session.
///
/// Ids are allocated from a per-session counter and never reused, so a fire
/// that arrives for an id other than the pending one is known to be stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Two-valued visibility signal reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Host explicitly starts the session. Only the first one counts.
    Initialize,

    BecameVisible,
    BecameHidden,

    /// A scroll tick. Zero payload, arbitrary frequency.
    Scroll,

    /// The wall-clock timer armed for `timer` elapsed.
    TimerFired {
        timer: TimerId,
    },

    /// The owning view is being destroyed.
    Teardown,
}

impl Event {
    /// Short lowercase label used in log lines and scripts.
    pub fn label(&self) -> &'static str {
        match self {
            Event::Initialize => "init",
            Event::BecameVisible => "show",
            Event::BecameHidden => "hide",
            Event::Scroll => "scroll",
            Event::TimerFired { .. } => "timer",
            Event::Teardown => "destroy",
        }
    }
}
