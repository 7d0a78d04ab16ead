// Author: Dustin Pilgrim
// License: MIT

use crate::core::{info::InfoSnapshot, state::Session};

use super::Manager;

impl Manager {
    pub fn snapshot(&self, state: &Session) -> InfoSnapshot {
        let pretty = format!(
            "Phase: {:?}\nDwell: {}ms\nStarted: {}\nVisible: {}\nPaused: {}\nPending timer: {}\nCompletions: {}\nResets: {}",
            state.phase(),
            self.cfg.duration_ms(),
            state.started(),
            state.visible(),
            state.paused(),
            state
                .pending_timer()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "none".to_string()),
            state.counters().completions,
            state.counters().resets,
        );

        InfoSnapshot {
            phase: state.phase(),
            dwell_ms: self.cfg.duration_ms(),
            started: state.started(),
            visible: state.visible(),
            paused: state.paused(),
            pending_timer: state.pending_timer().map(|t| t.0),
            counters: state.counters(),
            pretty_text: pretty,
        }
    }
}
