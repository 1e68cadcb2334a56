#![forbid(unsafe_code)]

//! Cancellable one-shot timers on a virtual clock.
//!
//! [`TimerQueue`] is the host timer facility for single-threaded, event-driven
//! code. Callbacks are scheduled relative to the queue's own clock and run
//! only when the host advances that clock, on the host's thread. This keeps
//! timer behaviour deterministic under test and lets a real event loop drive
//! the same queue from wall-clock time via [`RealtimeDriver`].
//!
//! # Invariants
//!
//! 1. A timer fires at most once, and never after [`TimerQueue::cancel`].
//! 2. Due timers fire in deadline order; equal deadlines fire in schedule order.
//! 3. Deadlines saturate at `Duration::MAX` instead of overflowing.
//! 4. Callbacks run with no borrow held, so they may schedule or cancel.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};
use web_time::{Duration, Instant};

type TimerCallback = Box<dyn FnOnce()>;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw sequence number (monotonic per queue).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct TimerQueueInner {
    now: Duration,
    next_seq: u64,
    /// Ordered by `(deadline, seq)`.
    pending: BTreeMap<(Duration, u64), TimerCallback>,
    deadlines: HashMap<u64, Duration>,
}

impl TimerQueueInner {
    fn pop_due(&mut self, target: Duration) -> Option<(u64, TimerCallback)> {
        let (&(deadline, seq), _) = self.pending.first_key_value()?;
        if deadline > target {
            return None;
        }
        let callback = self.pending.remove(&(deadline, seq))?;
        self.deadlines.remove(&seq);
        self.now = self.now.max(deadline);
        Some((seq, callback))
    }
}

/// Shared handle to a virtual-time timer queue.
///
/// Cloning shares the same queue.
#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<TimerQueueInner>>,
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TimerQueue")
            .field("now", &inner.now)
            .field("pending", &inner.pending.len())
            .finish()
    }
}

impl TimerQueue {
    /// Empty queue with its clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (elapsed since construction).
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Run `callback` once `delay` has elapsed on this queue's clock.
    pub fn schedule(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let deadline = inner.now.saturating_add(delay);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.pending.insert((deadline, seq), Box::new(callback));
        inner.deadlines.insert(seq, deadline);
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        trace!(timer = seq, delay_ms, "timer scheduled");
        TimerHandle(seq)
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&self, handle: TimerHandle) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            match inner.deadlines.remove(&handle.0) {
                Some(deadline) => inner.pending.remove(&(deadline, handle.0)),
                None => None,
            }
        };
        // Dropped outside the borrow: the callback may own other handles.
        let cancelled = removed.is_some();
        drop(removed);
        if cancelled {
            debug!(timer = handle.0, "timer cancelled");
        }
        cancelled
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn cancel_all(&self) -> usize {
        let drained = {
            let mut inner = self.inner.borrow_mut();
            inner.deadlines.clear();
            std::mem::take(&mut inner.pending)
        };
        let count = drained.len();
        drop(drained);
        if count > 0 {
            debug!(count, "all timers cancelled");
        }
        count
    }

    /// Whether `handle` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.inner.borrow().deadlines.contains_key(&handle.0)
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .pending
            .first_key_value()
            .map(|(&(deadline, _), _)| deadline)
    }

    /// Move the clock forward by `delta`, firing every timer that falls due.
    ///
    /// Timers scheduled by callbacks during this call also fire if their
    /// deadline lands within the advanced window. Returns the number fired.
    pub fn advance(&self, delta: Duration) -> usize {
        let target = self.now().saturating_add(delta);
        self.advance_to(target)
    }

    /// Move the clock to `target` (no-op if already past it), firing due
    /// timers. Returns the number fired.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        loop {
            let next = self.inner.borrow_mut().pop_due(target);
            let Some((seq, callback)) = next else {
                break;
            };
            trace!(timer = seq, "timer fired");
            callback();
            fired += 1;
        }
        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(target);
        fired
    }
}

/// Drives a [`TimerQueue`] from wall-clock time.
///
/// Call [`poll`](Self::poll) from the event loop; each call advances the
/// queue by the real time elapsed since the previous call.
#[derive(Debug)]
pub struct RealtimeDriver {
    timers: TimerQueue,
    last: Instant,
}

impl RealtimeDriver {
    /// Start driving `timers` from now.
    #[must_use]
    pub fn new(timers: TimerQueue) -> Self {
        Self {
            timers,
            last: Instant::now(),
        }
    }

    /// The driven queue.
    #[must_use]
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Advance by the wall-clock time since the last poll.
    pub fn poll(&mut self) -> usize {
        self.poll_at(Instant::now())
    }

    /// Advance by the time between the last poll and `now`.
    pub fn poll_at(&mut self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = self.last.max(now);
        self.timers.advance(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let make = move || {
            let c = Rc::clone(&c);
            Box::new(move || c.set(c.get() + 1)) as Box<dyn FnOnce()>
        };
        (count, make)
    }

    #[test]
    fn fires_only_when_due() {
        let timers = TimerQueue::new();
        let (count, make) = counter();
        timers.schedule(Duration::from_millis(100), make());

        assert_eq!(timers.advance(Duration::from_millis(99)), 0);
        assert_eq!(count.get(), 0);
        assert_eq!(timers.advance(Duration::from_millis(1)), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.now(), Duration::from_millis(100));
    }

    #[test]
    fn fires_at_most_once() {
        let timers = TimerQueue::new();
        let (count, make) = counter();
        timers.schedule(Duration::ZERO, make());
        timers.advance(Duration::from_secs(1));
        timers.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn cancel_prevents_firing() {
        let timers = TimerQueue::new();
        let (count, make) = counter();
        let handle = timers.schedule(Duration::from_millis(5), make());

        assert!(timers.is_pending(handle));
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(!timers.is_pending(handle));
        timers.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn deadline_then_schedule_order() {
        let timers = TimerQueue::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (label, delay) in [("late", 20), ("early-a", 10), ("early-b", 10)] {
            let order = Rc::clone(&order);
            timers.schedule(Duration::from_millis(delay), move || {
                order.borrow_mut().push(label);
            });
        }
        timers.advance(Duration::from_millis(50));
        assert_eq!(*order.borrow(), vec!["early-a", "early-b", "late"]);
    }

    #[test]
    fn huge_delay_saturates() {
        let timers = TimerQueue::new();
        let (count, make) = counter();
        timers.advance(Duration::from_secs(10));
        timers.schedule(Duration::MAX, make());
        assert_eq!(timers.next_deadline(), Some(Duration::MAX));

        timers.advance(Duration::from_secs(60 * 60 * 24 * 365));
        assert_eq!(count.get(), 0);
        timers.advance(Duration::MAX);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn schedule_trace_reports_saturated_delay() {
        use std::sync::{Arc, Mutex};
        use tracing::Subscriber;
        use tracing::field::{Field, Visit};
        use tracing_subscriber::Layer;
        use tracing_subscriber::layer::{Context, SubscriberExt};

        struct DelayVisitor(Option<u64>);

        impl Visit for DelayVisitor {
            fn record_u64(&mut self, field: &Field, value: u64) {
                if field.name() == "delay_ms" {
                    self.0 = Some(value);
                }
            }

            fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
        }

        struct DelayCapture(Arc<Mutex<Vec<u64>>>);

        impl<S: Subscriber> Layer<S> for DelayCapture {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                let mut visitor = DelayVisitor(None);
                event.record(&mut visitor);
                if let Some(ms) = visitor.0 {
                    self.0.lock().expect("delay log lock").push(ms);
                }
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let subscriber =
            tracing_subscriber::registry().with(DelayCapture(Arc::clone(&seen)));
        tracing::subscriber::with_default(subscriber, || {
            let timers = TimerQueue::new();
            timers.schedule(Duration::from_millis(250), || {});
            timers.schedule(Duration::MAX, || {});
        });
        assert_eq!(*seen.lock().expect("delay log lock"), vec![250, u64::MAX]);
    }

    #[test]
    fn callbacks_may_schedule_more() {
        let timers = TimerQueue::new();
        let (count, make) = counter();
        let inner = timers.clone();
        let follow_up = make();
        timers.schedule(Duration::from_millis(10), move || {
            inner.schedule(Duration::from_millis(10), follow_up);
        });

        assert_eq!(timers.advance(Duration::from_millis(25)), 2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn cancel_all_drops_everything() {
        let timers = TimerQueue::new();
        let (count, make) = counter();
        timers.schedule(Duration::from_millis(1), make());
        timers.schedule(Duration::from_millis(2), make());
        assert_eq!(timers.cancel_all(), 2);
        assert_eq!(timers.pending(), 0);
        timers.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn realtime_driver_advances_by_elapsed() {
        let timers = TimerQueue::new();
        let (count, make) = counter();
        timers.schedule(Duration::from_millis(50), make());

        let mut driver = RealtimeDriver::new(timers.clone());
        let start = driver.last;
        assert_eq!(driver.poll_at(start + Duration::from_millis(20)), 0);
        assert_eq!(driver.poll_at(start + Duration::from_millis(60)), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(driver.timers().now(), Duration::from_millis(60));

        // A stale instant never moves the clock backwards.
        assert_eq!(driver.poll_at(start), 0);
        assert_eq!(timers.now(), Duration::from_millis(60));
    }
}
