#![forbid(unsafe_code)]

//! The toast queue container.
//!
//! A [`Toaster`] owns the canonical [`ToastState`], the id generator and the
//! table of pending removal timers. Every change goes through
//! [`reduce`](crate::reducer::reduce) and is published synchronously to all
//! subscribers.
//!
//! # Example
//!
//! ```
//! use qline_runtime::{Duration, TimerQueue};
//! use qline_toast::{ToastProps, Toaster, ToasterConfig};
//!
//! let timers = TimerQueue::new();
//! let toaster = Toaster::new(
//!     ToasterConfig::default().remove_delay(Duration::from_secs(5)),
//!     timers.clone(),
//! );
//!
//! let handle = toaster.toast(ToastProps::new().title("Message sent"));
//! handle.dismiss();
//! assert!(!toaster.state().toasts()[0].is_open());
//!
//! timers.advance(Duration::from_secs(5));
//! assert!(toaster.is_empty());
//! ```
//!
//! # Removal timers
//!
//! Dismissing a toast marks it closed and schedules its removal after
//! [`ToasterConfig::remove_delay`]. At most one timer is pending per id.
//! A manual [`Toaster::remove`] does not cancel the timer; when it fires the
//! removal is a no-op. [`Toaster::teardown`], or dropping the last handle,
//! cancels every pending timer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use qline_runtime::{Duration, Observable, Subscription, TimerHandle, TimerQueue};
use tracing::{debug, trace};

use crate::reducer::{QueueAction, ToastState, reduce};
use crate::toast::{IdGenerator, Toast, ToastId, ToastPatch, ToastProps};

/// Default number of toasts listed at once.
pub const TOAST_LIMIT: usize = 1;

/// Default delay between dismissal and removal.
pub const TOAST_REMOVE_DELAY: Duration = Duration::from_millis(1_000_000);

/// Configuration for a [`Toaster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToasterConfig {
    /// Maximum toasts listed at once; older ones are dropped.
    pub limit: usize,
    /// Delay from dismissal to removal.
    pub remove_delay: Duration,
}

impl Default for ToasterConfig {
    fn default() -> Self {
        Self {
            limit: TOAST_LIMIT,
            remove_delay: TOAST_REMOVE_DELAY,
        }
    }
}

impl ToasterConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the removal delay.
    #[must_use]
    pub fn remove_delay(mut self, delay: Duration) -> Self {
        self.remove_delay = delay;
        self
    }

    /// Problems with this configuration, empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.limit == 0 {
            problems.push("toast limit must be at least 1".to_string());
        }
        problems
    }
}

struct ToasterInner {
    config: ToasterConfig,
    state: Observable<ToastState>,
    ids: RefCell<IdGenerator>,
    removals: RefCell<HashMap<ToastId, TimerHandle>>,
    timers: TimerQueue,
}

impl Drop for ToasterInner {
    fn drop(&mut self) {
        for (_, handle) in self.removals.get_mut().drain() {
            self.timers.cancel(handle);
        }
    }
}

/// Shared handle to one toast queue.
///
/// Cloning shares the same queue. Pass a `&Toaster` (or a clone) to every
/// component that raises or renders notifications.
#[derive(Clone)]
pub struct Toaster {
    inner: Rc<ToasterInner>,
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toaster")
            .field("config", &self.inner.config)
            .field("toasts", &self.len())
            .field("pending_removals", &self.pending_removals())
            .finish()
    }
}

impl Toaster {
    /// Empty queue scheduling its removal timers on `timers`.
    #[must_use]
    pub fn new(config: ToasterConfig, timers: TimerQueue) -> Self {
        let state = Observable::new(ToastState::with_limit(config.limit));
        Self {
            inner: Rc::new(ToasterInner {
                config,
                state,
                ids: RefCell::new(IdGenerator::default()),
                removals: RefCell::new(HashMap::new()),
                timers,
            }),
        }
    }

    /// The configuration this queue was built with.
    #[must_use]
    pub fn config(&self) -> &ToasterConfig {
        &self.inner.config
    }

    /// Create and show a toast.
    ///
    /// The returned handle can update or dismiss this toast later, and
    /// stays harmless after the toast or the queue is gone.
    pub fn toast(&self, props: ToastProps) -> ToastHandle {
        let id = self.inner.ids.borrow_mut().next_id();
        let on_close = props.on_close.clone();
        let weak = Rc::downgrade(&self.inner);
        let close_id = id.clone();
        let toast = Toast::from_props(id.clone(), props).with_open_change(Rc::new(
            move |open: bool| {
                if open {
                    return;
                }
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let toaster = Toaster { inner };
                let was_open = toaster
                    .inner
                    .state
                    .with(|state| state.get(&close_id).is_some_and(Toast::is_open));
                if !was_open {
                    return;
                }
                toaster.dismiss(Some(&close_id));
                if let Some(callback) = &on_close {
                    callback();
                }
            },
        ));
        self.dispatch(QueueAction::Add(toast));
        ToastHandle {
            id,
            toaster: Rc::downgrade(&self.inner),
        }
    }

    /// Merge `patch` into the toast with `id`. Unknown ids are ignored.
    ///
    /// A patch that closes the toast dismisses it, so its removal is
    /// scheduled like any other dismissal.
    pub fn update(&self, id: &ToastId, mut patch: ToastPatch) {
        let closes = patch.open == Some(false);
        if closes {
            patch.open = None;
        }
        self.dispatch(QueueAction::Update {
            id: id.clone(),
            patch,
        });
        if closes {
            self.dismiss(Some(id));
        }
    }

    /// Close one toast (or every toast for `None`) and schedule its removal.
    pub fn dismiss(&self, id: Option<&ToastId>) {
        let targets: Vec<ToastId> = self.inner.state.with(|state| match id {
            Some(id) if state.contains(id) => vec![id.clone()],
            Some(_) => Vec::new(),
            None => state.toasts().iter().map(|t| t.id().clone()).collect(),
        });
        for target in targets {
            self.schedule_removal(target);
        }
        self.dispatch(QueueAction::Dismiss(id.cloned()));
    }

    /// Delete one toast (or every toast for `None`) immediately.
    pub fn remove(&self, id: Option<&ToastId>) {
        self.dispatch(QueueAction::Remove(id.cloned()));
    }

    /// Apply `action` through the reducer and publish the result.
    pub fn dispatch(&self, action: QueueAction) {
        let kind = action.kind();
        self.inner.state.transition(|state| reduce(state, action));
        debug!(action = kind, toasts = self.len(), "toast queue transition");
    }

    /// Receive the full state after every transition.
    pub fn subscribe(&self, callback: impl Fn(&ToastState) + 'static) -> Subscription {
        self.inner.state.subscribe(callback)
    }

    /// Snapshot for the rendering layer, with a bound `dismiss`.
    #[must_use]
    pub fn use_state(&self) -> ToastView<'_> {
        ToastView {
            state: self.state(),
            toaster: self,
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ToastState {
        self.inner.state.get()
    }

    /// Number of toasts listed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.with(ToastState::len)
    }

    /// Whether no toasts are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of removal timers waiting to fire.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.inner.removals.borrow().len()
    }

    /// Whether a removal timer is pending for `id`.
    #[must_use]
    pub fn is_removal_pending(&self, id: &ToastId) -> bool {
        self.inner.removals.borrow().contains_key(id)
    }

    /// Cancel every pending removal timer and clear the queue. Returns the
    /// number of timers cancelled.
    pub fn teardown(&self) -> usize {
        let handles: Vec<TimerHandle> = self
            .inner
            .removals
            .borrow_mut()
            .drain()
            .map(|(_, handle)| handle)
            .collect();
        let cancelled = handles
            .into_iter()
            .filter(|handle| self.inner.timers.cancel(*handle))
            .count();
        self.dispatch(QueueAction::Remove(None));
        debug!(cancelled, "toast queue torn down");
        cancelled
    }

    fn schedule_removal(&self, id: ToastId) {
        if self.inner.removals.borrow().contains_key(&id) {
            trace!(toast = %id, "removal already pending");
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let fired_id = id.clone();
        let handle = self
            .inner
            .timers
            .schedule(self.inner.config.remove_delay, move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.removals.borrow_mut().remove(&fired_id);
                Toaster { inner }.remove(Some(&fired_id));
            });
        debug!(toast = %id, timer = handle.get(), "removal scheduled");
        self.inner.removals.borrow_mut().insert(id, handle);
    }
}

/// Handle returned by [`Toaster::toast`].
#[derive(Debug, Clone)]
pub struct ToastHandle {
    id: ToastId,
    toaster: Weak<ToasterInner>,
}

impl ToastHandle {
    /// The toast's id.
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// Merge `patch` into this toast.
    pub fn update(&self, patch: ToastPatch) {
        if let Some(inner) = self.toaster.upgrade() {
            Toaster { inner }.update(&self.id, patch);
        }
    }

    /// Dismiss this toast.
    pub fn dismiss(&self) {
        if let Some(inner) = self.toaster.upgrade() {
            Toaster { inner }.dismiss(Some(&self.id));
        }
    }
}

/// What the rendering layer needs: the listed toasts and a way to dismiss.
#[derive(Debug)]
pub struct ToastView<'a> {
    state: ToastState,
    toaster: &'a Toaster,
}

impl ToastView<'_> {
    /// Toasts at the time the view was taken, most recent first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        self.state.toasts()
    }

    /// Dismiss one toast, or all for `None`.
    pub fn dismiss(&self, id: Option<&ToastId>) {
        self.toaster.dismiss(id);
    }
}
