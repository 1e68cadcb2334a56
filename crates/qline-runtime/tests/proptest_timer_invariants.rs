//! Property-based invariant tests for the timer queue.
//!
//! 1. Timers fire exactly when the clock reaches their deadline
//! 2. Firing order is (deadline, schedule order)
//! 3. Cancelled timers never fire
//! 4. Advancing in steps fires the same set as one big advance

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use qline_runtime::{Duration, TimerQueue};

fn schedule_all(timers: &TimerQueue, delays: &[u64]) -> Rc<RefCell<Vec<usize>>> {
    let fired = Rc::new(RefCell::new(Vec::new()));
    for (idx, delay) in delays.iter().enumerate() {
        let fired = Rc::clone(&fired);
        timers.schedule(Duration::from_millis(*delay), move || {
            fired.borrow_mut().push(idx);
        });
    }
    fired
}

proptest! {
    #[test]
    fn fires_exactly_due_timers(
        delays in prop::collection::vec(0u64..1_000, 0..32),
        advance in 0u64..1_500,
    ) {
        let timers = TimerQueue::new();
        let fired = schedule_all(&timers, &delays);
        let count = timers.advance(Duration::from_millis(advance));

        let expected = delays.iter().filter(|d| **d <= advance).count();
        prop_assert_eq!(count, expected);
        prop_assert_eq!(fired.borrow().len(), expected);
        prop_assert_eq!(timers.pending(), delays.len() - expected);
    }

    #[test]
    fn firing_order_is_deadline_then_schedule(
        delays in prop::collection::vec(0u64..50, 0..32),
    ) {
        let timers = TimerQueue::new();
        let fired = schedule_all(&timers, &delays);
        timers.advance(Duration::from_millis(50));

        let mut expected: Vec<usize> = (0..delays.len()).collect();
        expected.sort_by_key(|idx| (delays[*idx], *idx));
        prop_assert_eq!(fired.borrow().clone(), expected);
    }

    #[test]
    fn cancelled_timers_never_fire(
        plan in prop::collection::vec((0u64..100, any::<bool>()), 0..32),
    ) {
        let timers = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut cancelled = Vec::new();
        for (idx, (delay, cancel)) in plan.iter().enumerate() {
            let fired = Rc::clone(&fired);
            let handle = timers.schedule(Duration::from_millis(*delay), move || {
                fired.borrow_mut().push(idx);
            });
            if *cancel {
                prop_assert!(timers.cancel(handle));
                cancelled.push(idx);
            }
        }
        timers.advance(Duration::from_millis(100));
        for idx in &cancelled {
            prop_assert!(!fired.borrow().contains(idx));
        }
        prop_assert_eq!(fired.borrow().len(), plan.len() - cancelled.len());
        prop_assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn stepping_matches_single_advance(
        delays in prop::collection::vec(0u64..200, 0..16),
        steps in prop::collection::vec(1u64..40, 1..10),
    ) {
        let total: u64 = steps.iter().sum();

        let stepped = TimerQueue::new();
        let stepped_fired = schedule_all(&stepped, &delays);
        for step in &steps {
            stepped.advance(Duration::from_millis(*step));
        }

        let single = TimerQueue::new();
        let single_fired = schedule_all(&single, &delays);
        single.advance(Duration::from_millis(total));

        prop_assert_eq!(stepped_fired.borrow().clone(), single_fired.borrow().clone());
        prop_assert_eq!(stepped.now(), single.now());
    }
}
