// Author: Dustin Pilgrim
// License: MIT

use std::cell::RefCell;
use std::rc::Rc;

type Cleanup = Box<dyn FnOnce()>;

#[derive(Default)]
struct Inner {
    disposed: bool,
    cleanups: Vec<Cleanup>,
}

/// Disposal trigger for one host view.
///
/// Anything acquired on behalf of the view registers its release here.
/// `dispose` runs every cleanup exactly once, newest first. A cleanup
/// registered after disposal runs immediately, so nothing outlives the view.
#[derive(Clone, Default)]
pub struct Lifetime {
    inner: Rc<RefCell<Inner>>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        !self.inner.borrow().disposed
    }

    pub fn on_dispose(&self, cleanup: impl FnOnce() + 'static) {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.disposed {
                inner.cleanups.push(Box::new(cleanup));
                return;
            }
        }
        cleanup();
    }

    pub fn dispose(&self) {
        // Borrow is released before running cleanups; they may touch this lifetime.
        let cleanups = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            std::mem::take(&mut inner.cleanups)
        };

        for cleanup in cleanups.into_iter().rev() {
            cleanup();
        }
    }

    pub fn pending_cleanups(&self) -> usize {
        self.inner.borrow().cleanups.len()
    }
}

impl std::fmt::Debug for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Lifetime")
            .field("disposed", &inner.disposed)
            .field("cleanups", &inner.cleanups.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn dispose_runs_cleanups_newest_first_once() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let lt = Lifetime::new();

        for i in 0..3 {
            let order = order.clone();
            lt.on_dispose(move || order.borrow_mut().push(i));
        }
        assert_eq!(lt.pending_cleanups(), 3);

        lt.dispose();
        lt.dispose();

        assert_eq!(*order.borrow(), vec![2, 1, 0]);
        assert!(!lt.is_alive());
        assert_eq!(lt.pending_cleanups(), 0);
    }

    #[test]
    fn late_registration_runs_immediately() {
        let ran = Rc::new(RefCell::new(false));
        let lt = Lifetime::new();
        lt.dispose();

        let flag = ran.clone();
        lt.on_dispose(move || *flag.borrow_mut() = true);

        assert!(*ran.borrow());
    }

    #[test]
    fn clones_share_one_disposal() {
        let lt = Lifetime::new();
        let other = lt.clone();
        other.dispose();
        assert!(!lt.is_alive());
    }

    #[test]
    fn cleanup_may_register_more_cleanup() {
        let ran = Rc::new(RefCell::new(0));
        let lt = Lifetime::new();

        let inner_lt = lt.clone();
        let counter = ran.clone();
        lt.on_dispose(move || {
            let counter = counter.clone();
            inner_lt.on_dispose(move || *counter.borrow_mut() += 1);
        });

        lt.dispose();
        assert_eq!(*ran.borrow(), 1);
    }
}
