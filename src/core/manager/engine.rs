// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action,
    events::{Event, TimerId},
    state::Session,
};

use super::Manager;

impl Manager {
    /// Applies one event to `state` and returns what the runtime must do.
    ///
    /// Never fails: every input is either a transition or a silent no-op.
    pub fn handle_event(&self, state: &mut Session, event: Event) -> Vec<Action> {
        let mut out = Vec::new();

        if !state.is_alive() {
            return out;
        }

        match event {
            Event::Initialize => {
                if state.started() {
                    return out;
                }
                state.mark_started();
                out.push(self.arm(state));
            }

            Event::BecameVisible => {
                if !state.started() {
                    return out;
                }
                state.set_visible(true);

                // Resume re-arms the full duration; time spent before the
                // pause is not carried over.
                if state.paused() {
                    state.set_paused(false);
                    out.push(self.arm(state));
                }
            }

            Event::BecameHidden => {
                if !state.started() {
                    return out;
                }
                state.set_visible(false);
                state.set_paused(true);

                if let Some(timer) = state.take_pending_timer() {
                    out.push(Action::CancelTimer { timer });
                }
            }

            Event::Scroll => {
                if !state.started() || !state.visible() {
                    return out;
                }

                if let Some(timer) = state.take_pending_timer() {
                    state.note_reset();
                    out.push(Action::CancelTimer { timer });
                }
                out.push(self.arm(state));
            }

            Event::TimerFired { timer } => {
                if state.pending_timer() != Some(timer) {
                    state.note_stale_fire();
                    return out;
                }
                let _ = state.take_pending_timer();
                state.note_completion();
                out.push(Action::Complete);
            }

            Event::Teardown => {
                state.mark_dead();

                if let Some(timer) = state.take_pending_timer() {
                    out.push(Action::CancelTimer { timer });
                }
            }
        }

        debug_assert!(state.invariants_hold(), "dwell invariants violated: {state:?}");

        out
    }

    fn arm(&self, state: &mut Session) -> Action {
        let timer: TimerId = state.arm();
        Action::ArmTimer {
            timer,
            after: self.cfg.duration(),
        }
    }
}
