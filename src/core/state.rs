// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

use crate::core::events::TimerId;

/// Display-level view of the session, derived from the booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    /// Visible with a dwell interval counting down.
    ActiveVisible,
    /// Hidden; dwell accounting suspended.
    ActiveHidden,
    /// Visible, last interval completed and nothing re-armed it yet.
    Completed,
    TornDown,
}

/// Running totals for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub arms: u64,
    /// Scrolls that threw away a running interval.
    pub resets: u64,
    pub pauses: u64,
    pub resumes: u64,
    pub completions: u64,
    /// Timer fires that arrived for a cancelled or replaced interval.
    pub stale_fires: u64,
}

/// The dwell session owned by one view instance.
#[derive(Debug, Clone)]
pub struct Session {
    started: bool,
    visible: bool,
    paused: bool,
    pending_timer: Option<TimerId>,

    // Cleared on teardown; every later event is a no-op.
    alive: bool,

    next_timer_id: u64,
    counters: Counters,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            started: false,
            visible: false,
            paused: false,
            pending_timer: None,
            alive: true,
            next_timer_id: 0,
            counters: Counters::default(),
        }
    }

    // ---------------- getters ----------------

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending_timer
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn phase(&self) -> Phase {
        if !self.alive {
            Phase::TornDown
        } else if !self.started {
            Phase::Uninitialized
        } else if !self.visible {
            Phase::ActiveHidden
        } else if self.pending_timer.is_some() {
            Phase::ActiveVisible
        } else {
            Phase::Completed
        }
    }

    /// At most one pending timer, and only while started, visible and not paused.
    pub fn invariants_hold(&self) -> bool {
        let timer_ok = match self.pending_timer {
            Some(_) => self.alive && self.started && self.visible && !self.paused,
            None => true,
        };
        let pause_ok = !self.paused || !self.visible;
        let start_ok = self.started || (!self.visible && !self.paused);

        timer_ok && pause_ok && start_ok
    }

    // ---------------- transitions (manager only) ----------------

    pub(crate) fn mark_started(&mut self) {
        self.started = true;
        self.visible = true;
        self.paused = false;
    }

    pub(crate) fn set_visible(&mut self, v: bool) {
        self.visible = v;
    }

    pub(crate) fn set_paused(&mut self, v: bool) {
        if v && !self.paused {
            self.counters.pauses += 1;
        } else if !v && self.paused {
            self.counters.resumes += 1;
        }
        self.paused = v;
    }

    pub(crate) fn mark_dead(&mut self) {
        self.alive = false;
    }

    /// Allocates a fresh id and makes it the pending timer.
    pub(crate) fn arm(&mut self) -> TimerId {
        self.next_timer_id = self.next_timer_id.wrapping_add(1);
        let id = TimerId(self.next_timer_id);
        self.pending_timer = Some(id);
        self.counters.arms += 1;
        id
    }

    /// Take-and-clear helper.
    pub(crate) fn take_pending_timer(&mut self) -> Option<TimerId> {
        self.pending_timer.take()
    }

    pub(crate) fn note_reset(&mut self) {
        self.counters.resets += 1;
    }

    pub(crate) fn note_completion(&mut self) {
        self.counters.completions += 1;
    }

    pub(crate) fn note_stale_fire(&mut self) {
        self.counters.stale_fires += 1;
    }
}
