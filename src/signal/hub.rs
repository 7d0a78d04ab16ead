// Author: Dustin Pilgrim
// License: MIT

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{RawSignal, SignalHandler, SignalKind, SignalSource, Subscription};
use crate::sdebug;

struct Entry {
    id: u64,
    kind: SignalKind,
    active: Rc<Cell<bool>>,
    handler: Rc<RefCell<SignalHandler>>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// In-process signal source for a single-threaded host loop.
///
/// The host pushes environment notifications in with [`SignalHub::emit`].
/// Delivery works on a snapshot of the subscribers, so handlers may subscribe
/// or unsubscribe while a signal is being delivered. A handler removed
/// mid-delivery is not called.
#[derive(Clone, Default)]
pub struct SignalHub {
    inner: Rc<RefCell<Inner>>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, signal: RawSignal) {
        let kind = signal.kind();

        let targets: Vec<(Rc<Cell<bool>>, Rc<RefCell<SignalHandler>>)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.active.clone(), e.handler.clone()))
            .collect();

        for (active, handler) in targets {
            if !active.get() {
                continue;
            }
            // A handler re-emitting its own kind would re-enter itself.
            match handler.try_borrow_mut() {
                Ok(mut h) => (*h)(&signal),
                Err(_) => sdebug!("Signal", "dropped nested {:?} for a handler still running", signal),
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl SignalSource for SignalHub {
    fn subscribe(&self, kind: SignalKind, handler: SignalHandler) -> Subscription {
        let active = Rc::new(Cell::new(true));

        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id = inner.next_id.wrapping_add(1);
            let id = inner.next_id;
            inner.entries.push(Entry {
                id,
                kind,
                active: active.clone(),
                handler: Rc::new(RefCell::new(handler)),
            });
            id
        };

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            active.set(false);
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().entries.retain(|e| e.id != id);
            }
        })
    }
}
