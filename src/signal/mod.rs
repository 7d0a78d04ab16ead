// Author: Dustin Pilgrim
// License: MIT

pub mod hub;

use std::rc::Rc;

use crate::core::events::Visibility;
use crate::lifetime::Lifetime;

pub use self::hub::SignalHub;

/// Which environment signal a subscription listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    VisibilityChange,
    Scroll,
}

/// A raw notification as delivered by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSignal {
    VisibilityChange(Visibility),
    Scroll,
}

impl RawSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            RawSignal::VisibilityChange(_) => SignalKind::VisibilityChange,
            RawSignal::Scroll => SignalKind::Scroll,
        }
    }
}

pub type SignalHandler = Box<dyn FnMut(&RawSignal)>;

/// Undo token returned by [`SignalSource::subscribe`].
#[must_use = "dropping a Subscription leaves the handler registered"]
pub struct Subscription {
    unsubscribe: Box<dyn FnOnce()>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Box::new(unsubscribe),
        }
    }

    pub fn unsubscribe(self) {
        (self.unsubscribe)();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}

/// Capability to listen to the host environment.
///
/// The concrete binding (a browser document, a window system, stdin) lives
/// with the host; the dwell core only sees this trait.
pub trait SignalSource {
    fn subscribe(&self, kind: SignalKind, handler: SignalHandler) -> Subscription;
}

/// Classifies raw environment signals into the three dwell events and ties
/// every subscription to the owning view's [`Lifetime`].
#[derive(Clone)]
pub struct SignalAdapter {
    source: Rc<dyn SignalSource>,
    lifetime: Lifetime,
}

impl SignalAdapter {
    pub fn new(source: Rc<dyn SignalSource>, lifetime: Lifetime) -> Self {
        Self { source, lifetime }
    }

    /// Runs `handler` each time the view becomes visible.
    pub fn on_became_visible(&self, handler: impl FnMut() + 'static) {
        self.on_visibility(Visibility::Visible, handler);
    }

    /// Runs `handler` each time the view becomes hidden.
    pub fn on_became_hidden(&self, handler: impl FnMut() + 'static) {
        self.on_visibility(Visibility::Hidden, handler);
    }

    /// Runs `handler` on every scroll tick. No debouncing.
    pub fn on_scroll(&self, mut handler: impl FnMut() + 'static) {
        self.register(
            SignalKind::Scroll,
            Box::new(move |sig: &RawSignal| {
                if matches!(sig, RawSignal::Scroll) {
                    handler();
                }
            }),
        );
    }

    fn on_visibility(&self, target: Visibility, mut handler: impl FnMut() + 'static) {
        self.register(
            SignalKind::VisibilityChange,
            Box::new(move |sig: &RawSignal| {
                if *sig == RawSignal::VisibilityChange(target) {
                    handler();
                }
            }),
        );
    }

    fn register(&self, kind: SignalKind, handler: SignalHandler) {
        let sub = self.source.subscribe(kind, handler);
        self.lifetime.on_dispose(move || sub.unsubscribe());
    }
}
