//! Single-threaded fan-out signals with scoped subscriptions.
//!
//! A [`Signal`] delivers each emitted value to every live handler, in
//! subscription order.  [`Signal::subscribe`] hands back a [`Subscription`];
//! dropping it deregisters the handler, so a component can never be invoked
//! against a page that has been torn down.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
    /// Number of `emit` calls currently running on this signal.
    depth: usize,
    /// Ids released while emitting; pruned as each pass puts its list back.
    released: Vec<u64>,
}

impl<T> Registry<T> {
    fn release(&mut self, id: u64) {
        if self.depth > 0 {
            self.released.push(id);
        } else {
            self.handlers.retain(|(h, _)| *h != id);
        }
    }
}

/// A broadcast point for values of type `T`.
pub struct Signal<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
                depth: 0,
                released: Vec::new(),
            })),
        }
    }

    /// Register `handler`.  It stays registered until the returned
    /// [`Subscription`] is dropped.
    #[must_use = "dropping the subscription immediately deregisters the handler"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.handlers.push((id, Box::new(handler)));

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(reg) = weak.upgrade() {
                    reg.borrow_mut().release(id);
                }
            })),
        }
    }

    /// Deliver `value` to every handler, synchronously, in order.
    ///
    /// An `emit` from inside a handler only reaches handlers subscribed
    /// during the outer pass; the outer pass holds the rest.
    pub fn emit(&self, value: &T) {
        let mut handlers = {
            let mut reg = self.registry.borrow_mut();
            reg.depth += 1;
            std::mem::take(&mut reg.handlers)
        };

        for (_, handler) in handlers.iter_mut() {
            handler(value);
        }

        let mut reg = self.registry.borrow_mut();
        reg.depth -= 1;
        // Handlers subscribed from inside a handler landed in the fresh list.
        let added = std::mem::take(&mut reg.handlers);
        handlers.extend(added);
        handlers.retain(|(id, _)| !reg.released.contains(id));
        reg.handlers = handlers;
        if reg.depth == 0 {
            reg.released.clear();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.registry.try_borrow().map(|r| r.handlers.len()).ok();
        f.debug_struct("Signal").field("subscribers", &count).finish()
    }
}

/// Registration handle.  Deregisters on drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Deregister now rather than at end of scope.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.release.is_some())
            .finish()
    }
}
