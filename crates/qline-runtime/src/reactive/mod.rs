#![forbid(unsafe_code)]

//! Reactive primitives shared by qline state containers.

pub mod observable;

pub use observable::{Observable, Subscription};
