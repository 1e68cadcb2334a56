#![forbid(unsafe_code)]

//! qline Runtime
//!
//! Single-threaded, event-driven support code for the qline state
//! containers.
//!
//! # Key Components
//!
//! - [`Observable`] - Shared value that publishes snapshots to subscribers
//! - [`Subscription`] - RAII guard that deregisters a subscriber on drop
//! - [`TimerQueue`] - Cancellable one-shot timers on a virtual clock
//! - [`RealtimeDriver`] - Pumps a [`TimerQueue`] from wall-clock time
//!
//! # How it fits in the system
//! `qline-toast` publishes its queue through an [`Observable`] and schedules
//! removal timers on a [`TimerQueue`]. The host owns the queue and advances
//! it from its event loop.

pub mod reactive;
pub mod timer;

pub use reactive::{Observable, Subscription};
pub use timer::{RealtimeDriver, TimerHandle, TimerQueue};
pub use web_time::Duration;
