#![forbid(unsafe_code)]

//! A shared value that publishes every new state to its listeners.
//!
//! State containers keep their canonical value in an [`Observable`] and
//! replace it wholesale on each transition. Listeners get a reference to a
//! snapshot taken after the change; they never see the stored value itself,
//! so they cannot mutate it.
//!
//! Listeners are held weakly. The [`Subscription`] returned by
//! [`Observable::subscribe`] owns the callback, and entries whose guard is
//! gone are swept out the next time the value is published.
//!
//! Publishing from inside a listener is allowed: nothing is borrowed while
//! listeners run, so the nested publish (and its notifications) finishes
//! before the outer round continues.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace_span;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
    value: T,
    version: u64,
    listeners: Vec<Weak<dyn Fn(&T)>>,
}

/// Shared value with versioning and snapshot publication.
///
/// Clones are handles to the same value.
///
/// # Invariants
///
/// 1. Each publish bumps `version` by one.
/// 2. [`set`](Self::set) and [`update`](Self::update) publish only on
///    change; [`replace`](Self::replace) and
///    [`transition`](Self::transition) always publish.
/// 3. Listeners run in the order they subscribed.
/// 4. A listener whose [`Subscription`] was dropped is never called.
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Observable")
            .field("value", &shared.value)
            .field("version", &shared.version)
            .field("listeners", &shared.listeners.len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                value,
                version: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.borrow().value.clone()
    }

    /// Run `f` against the current value without cloning it.
    ///
    /// `f` must not publish to this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.borrow().value)
    }

    /// Store `value` and publish it, even if it equals the old one.
    pub fn replace(&self, value: T) {
        {
            let mut shared = self.shared.borrow_mut();
            shared.value = value;
            shared.version += 1;
        }
        self.publish();
    }

    /// Derive the next value from the current one and publish it.
    pub fn transition(&self, f: impl FnOnce(&T) -> T) {
        let next = self.with(f);
        self.replace(next);
    }

    /// Register `callback` for every future publish.
    ///
    /// The callback stays registered for as long as the returned guard lives.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(callback);
        self.shared
            .borrow_mut()
            .listeners
            .push(Rc::downgrade(&listener));
        Subscription {
            _listener: Box::new(listener),
        }
    }

    /// Number of publishes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.borrow().version
    }

    /// Registered listeners, counting dropped ones not yet swept.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().listeners.len()
    }

    fn publish(&self) {
        let (listeners, snapshot): (Vec<Weak<dyn Fn(&T)>>, T) = {
            let mut shared = self.shared.borrow_mut();
            shared.listeners.retain(|l| l.strong_count() > 0);
            (shared.listeners.clone(), shared.value.clone())
        };
        if listeners.is_empty() {
            return;
        }
        let _span = trace_span!("observable.publish", listeners = listeners.len()).entered();
        // Upgrade one at a time: an earlier listener may drop a later guard.
        for weak in &listeners {
            if let Some(listener) = weak.upgrade() {
                listener(&snapshot);
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Store and publish `value` unless it equals the current value.
    pub fn set(&self, value: T) {
        if self.with(|current| *current == value) {
            return;
        }
        self.replace(value);
    }

    /// Edit the value in place; publishes only if the edit changed it.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }
}

/// Keeps a listener registered. Drop it (or call
/// [`unsubscribe`](Self::unsubscribe)) to stop delivery.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _listener: Box<dyn Any>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}
