// Author: Dustin Pilgrim
// License: MIT

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::{
    core::{
        action::Action,
        config::DwellConfig,
        events::{Event, TimerId},
        info::InfoSnapshot,
        manager::Manager,
        state::Session,
    },
    lifetime::Lifetime,
    sdebug, sinfo,
    signal::SignalAdapter,
    timer::{TimerHandle, TimerService},
};

pub type CompletionCallback = Box<dyn FnMut()>;

struct Inner {
    manager: Manager,
    session: RefCell<Session>,
    timers: Rc<dyn TimerService>,
    // The one timer this session has in flight, as the service knows it.
    scheduled: RefCell<Option<(TimerId, TimerHandle)>>,
    on_complete: RefCell<Option<CompletionCallback>>,
}

/// Runs the dwell state machine for one view.
///
/// Single-threaded: every handler and timer callback runs to completion on
/// the host event loop. Cheap to clone; clones drive the same session.
#[derive(Clone)]
pub struct DwellController {
    inner: Rc<Inner>,
}

impl DwellController {
    /// Wires a session to the view's signals, timers and lifetime.
    ///
    /// Visibility and scroll handlers are registered through `adapter`, and a
    /// teardown that cancels the pending timer is registered on `lifetime`.
    pub fn attach(
        config: DwellConfig,
        on_complete: Option<CompletionCallback>,
        adapter: &SignalAdapter,
        timers: Rc<dyn TimerService>,
        lifetime: &Lifetime,
    ) -> Self {
        let inner = Rc::new(Inner {
            manager: Manager::new(config),
            session: RefCell::new(Session::new()),
            timers,
            scheduled: RefCell::new(None),
            on_complete: RefCell::new(on_complete),
        });

        adapter.on_became_visible(forward(&inner, Event::BecameVisible));
        adapter.on_became_hidden(forward(&inner, Event::BecameHidden));
        adapter.on_scroll(forward(&inner, Event::Scroll));

        // The view's lifetime owns the session until disposal, whether or not
        // the caller keeps a handle.
        let owned = inner.clone();
        lifetime.on_dispose(move || dispatch(&owned, Event::Teardown));

        sdebug!("Dwell", "session attached (dwell {}ms)", config.duration_ms());

        Self { inner }
    }

    /// Starts the session. Only the first call has any effect.
    pub fn initialize(&self) {
        dispatch(&self.inner, Event::Initialize);
    }

    pub fn is_alive(&self) -> bool {
        self.inner.session.borrow().is_alive()
    }

    pub fn snapshot(&self) -> InfoSnapshot {
        self.inner.manager.snapshot(&self.inner.session.borrow())
    }

    pub fn config(&self) -> DwellConfig {
        *self.inner.manager.config()
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.scheduled.get_mut().take() {
            self.timers.cancel(handle);
        }
    }
}

fn forward(inner: &Rc<Inner>, event: Event) -> impl FnMut() + 'static {
    let weak: Weak<Inner> = Rc::downgrade(inner);
    move || {
        if let Some(inner) = weak.upgrade() {
            dispatch(&inner, event.clone());
        }
    }
}

fn dispatch(inner: &Rc<Inner>, event: Event) {
    let label = event.label();

    let actions = {
        let mut session = inner.session.borrow_mut();
        inner.manager.handle_event(&mut session, event)
    };

    if actions.is_empty() {
        return;
    }
    sdebug!("Dwell", "{} -> {:?}", label, actions);

    for action in actions {
        execute(inner, action);
    }
}

fn execute(inner: &Rc<Inner>, action: Action) {
    match action {
        Action::ArmTimer { timer, after } => {
            let weak = Rc::downgrade(inner);
            let handle = inner.timers.schedule_after(
                after,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        dispatch(&inner, Event::TimerFired { timer });
                    }
                }),
            );

            let replaced = inner.scheduled.borrow_mut().replace((timer, handle));
            // The engine cancels before it re-arms; a leftover here is a stale handle.
            if let Some((_, old)) = replaced {
                inner.timers.cancel(old);
            }
        }

        Action::CancelTimer { timer } => {
            let taken = {
                let mut scheduled = inner.scheduled.borrow_mut();
                match *scheduled {
                    Some((id, _)) if id == timer => scheduled.take(),
                    _ => None,
                }
            };
            if let Some((_, handle)) = taken {
                inner.timers.cancel(handle);
            }
        }

        Action::Complete => {
            inner.scheduled.borrow_mut().take();

            sinfo!("Dwell", "dwell completed");

            // Run without holding the slot so the callback may re-enter.
            let callback = inner.on_complete.borrow_mut().take();
            if let Some(mut cb) = callback {
                cb();
                let mut slot = inner.on_complete.borrow_mut();
                if slot.is_none() {
                    *slot = Some(cb);
                }
            }
        }
    }
}
