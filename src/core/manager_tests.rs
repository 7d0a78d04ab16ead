// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use crate::core::action::Action;
use crate::core::config::DwellConfig;
use crate::core::events::{Event, TimerId};
use crate::core::manager::Manager;
use crate::core::state::{Phase, Session};

fn mgr(ms: u64) -> Manager {
    Manager::new(DwellConfig::from_millis(ms).unwrap())
}

fn armed(actions: &[Action]) -> Option<TimerId> {
    actions.iter().find_map(|a| match a {
        Action::ArmTimer { timer, .. } => Some(*timer),
        _ => None,
    })
}

#[test]
fn initialize_arms_full_duration() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let actions = mgr.handle_event(&mut state, Event::Initialize);

    assert_eq!(
        actions,
        vec![Action::ArmTimer {
            timer: TimerId(1),
            after: Duration::from_millis(1000),
        }]
    );
    assert!(state.started());
    assert!(state.visible());
    assert!(!state.paused());
    assert_eq!(state.phase(), Phase::ActiveVisible);
}

#[test]
fn second_initialize_is_a_noop() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let _ = mgr.handle_event(&mut state, Event::Initialize);
    let pending = state.pending_timer();

    let actions = mgr.handle_event(&mut state, Event::Initialize);
    assert!(actions.is_empty());
    assert_eq!(state.pending_timer(), pending);
    assert_eq!(state.counters().arms, 1);
}

#[test]
fn events_before_initialize_change_nothing() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    for ev in [Event::BecameVisible, Event::BecameHidden, Event::Scroll] {
        let actions = mgr.handle_event(&mut state, ev);
        assert!(actions.is_empty());
    }

    assert!(!state.started());
    assert!(!state.visible());
    assert!(!state.paused());
    assert!(state.pending_timer().is_none());
    assert_eq!(state.phase(), Phase::Uninitialized);
}

#[test]
fn hide_cancels_the_running_interval() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let first = armed(&mgr.handle_event(&mut state, Event::Initialize)).unwrap();
    let actions = mgr.handle_event(&mut state, Event::BecameHidden);

    assert_eq!(actions, vec![Action::CancelTimer { timer: first }]);
    assert!(state.paused());
    assert!(!state.visible());
    assert!(state.pending_timer().is_none());

    // A fire that was already queued for the cancelled interval is ignored.
    let actions = mgr.handle_event(&mut state, Event::TimerFired { timer: first });
    assert!(actions.is_empty());
    assert_eq!(state.counters().completions, 0);
    assert_eq!(state.counters().stale_fires, 1);
}

#[test]
fn repeated_hide_is_idempotent() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let _ = mgr.handle_event(&mut state, Event::Initialize);
    let _ = mgr.handle_event(&mut state, Event::BecameHidden);
    let actions = mgr.handle_event(&mut state, Event::BecameHidden);

    assert!(actions.is_empty());
    assert_eq!(state.counters().pauses, 1);
}

#[test]
fn show_after_hide_rearms_full_duration() {
    let mgr = mgr(800);
    let mut state = Session::new();

    let first = armed(&mgr.handle_event(&mut state, Event::Initialize)).unwrap();
    let _ = mgr.handle_event(&mut state, Event::BecameHidden);
    let actions = mgr.handle_event(&mut state, Event::BecameVisible);

    assert_eq!(actions.len(), 1);
    match &actions[0] {
        Action::ArmTimer { timer, after } => {
            assert_ne!(*timer, first);
            assert_eq!(*after, Duration::from_millis(800));
        }
        other => panic!("expected ArmTimer, got {other:?}"),
    }
    assert!(!state.paused());
    assert_eq!(state.counters().resumes, 1);
}

#[test]
fn show_while_already_visible_does_not_rearm() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let _ = mgr.handle_event(&mut state, Event::Initialize);
    let pending = state.pending_timer();

    let actions = mgr.handle_event(&mut state, Event::BecameVisible);
    assert!(actions.is_empty());
    assert_eq!(state.pending_timer(), pending);
}

#[test]
fn scroll_replaces_the_pending_interval() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let first = armed(&mgr.handle_event(&mut state, Event::Initialize)).unwrap();
    let actions = mgr.handle_event(&mut state, Event::Scroll);

    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], Action::CancelTimer { timer: first });
    let second = armed(&actions).unwrap();
    assert_ne!(first, second);
    assert_eq!(state.pending_timer(), Some(second));
    assert_eq!(state.counters().resets, 1);

    // The original deadline must not complete anything.
    assert!(mgr
        .handle_event(&mut state, Event::TimerFired { timer: first })
        .is_empty());
    assert_eq!(
        mgr.handle_event(&mut state, Event::TimerFired { timer: second }),
        vec![Action::Complete]
    );
}

#[test]
fn scroll_while_hidden_is_ignored() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let _ = mgr.handle_event(&mut state, Event::Initialize);
    let _ = mgr.handle_event(&mut state, Event::BecameHidden);

    assert!(mgr.handle_event(&mut state, Event::Scroll).is_empty());
    assert!(state.pending_timer().is_none());
    assert_eq!(state.phase(), Phase::ActiveHidden);
}

#[test]
fn completion_fires_once_and_does_not_restart() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let timer = armed(&mgr.handle_event(&mut state, Event::Initialize)).unwrap();

    assert_eq!(
        mgr.handle_event(&mut state, Event::TimerFired { timer }),
        vec![Action::Complete]
    );
    assert!(state.pending_timer().is_none());
    assert_eq!(state.phase(), Phase::Completed);

    // Same handle again: no double fire.
    assert!(mgr
        .handle_event(&mut state, Event::TimerFired { timer })
        .is_empty());
    assert_eq!(state.counters().completions, 1);
}

#[test]
fn scroll_after_completion_starts_a_new_interval() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let timer = armed(&mgr.handle_event(&mut state, Event::Initialize)).unwrap();
    let _ = mgr.handle_event(&mut state, Event::TimerFired { timer });

    let actions = mgr.handle_event(&mut state, Event::Scroll);
    assert_eq!(actions.len(), 1);
    assert!(armed(&actions).is_some());
    // Nothing was running, so this is not counted as a reset.
    assert_eq!(state.counters().resets, 0);
}

#[test]
fn hide_after_completion_pauses_without_cancel() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let timer = armed(&mgr.handle_event(&mut state, Event::Initialize)).unwrap();
    let _ = mgr.handle_event(&mut state, Event::TimerFired { timer });

    assert!(mgr.handle_event(&mut state, Event::BecameHidden).is_empty());
    assert!(state.paused());

    // Coming back counts as a resume and arms again.
    let actions = mgr.handle_event(&mut state, Event::BecameVisible);
    assert!(armed(&actions).is_some());
}

#[test]
fn teardown_cancels_and_silences_everything() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let timer = armed(&mgr.handle_event(&mut state, Event::Initialize)).unwrap();
    let actions = mgr.handle_event(&mut state, Event::Teardown);

    assert_eq!(actions, vec![Action::CancelTimer { timer }]);
    assert_eq!(state.phase(), Phase::TornDown);

    for ev in [
        Event::Initialize,
        Event::BecameVisible,
        Event::BecameHidden,
        Event::Scroll,
        Event::TimerFired { timer },
        Event::Teardown,
    ] {
        assert!(mgr.handle_event(&mut state, ev).is_empty());
    }
    assert_eq!(state.counters().completions, 0);
}

#[test]
fn teardown_while_hidden_has_nothing_to_cancel() {
    let mgr = mgr(1000);
    let mut state = Session::new();

    let _ = mgr.handle_event(&mut state, Event::Initialize);
    let _ = mgr.handle_event(&mut state, Event::BecameHidden);

    assert!(mgr.handle_event(&mut state, Event::Teardown).is_empty());
    assert!(state.pending_timer().is_none());
}

#[test]
fn invariants_hold_across_a_mixed_sequence() {
    let mgr = mgr(1000);
    let mut state = Session::new();
    let mut last = None;

    let seq = [
        Event::Scroll,
        Event::Initialize,
        Event::Scroll,
        Event::Scroll,
        Event::BecameHidden,
        Event::Scroll,
        Event::BecameVisible,
        Event::BecameVisible,
        Event::Initialize,
        Event::BecameHidden,
        Event::BecameVisible,
    ];

    for ev in seq {
        let actions = mgr.handle_event(&mut state, ev);
        if let Some(t) = armed(&actions) {
            last = Some(t);
        }
        assert!(state.invariants_hold(), "{state:?}");
    }

    assert_eq!(state.pending_timer(), last);
    assert_eq!(state.counters().arms, 5);
    assert_eq!(state.counters().resets, 2);
}
