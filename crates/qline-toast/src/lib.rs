#![forbid(unsafe_code)]

//! Toast notification queue for the qline site.
//!
//! A capacity-bounded list of notifications, changed only through a pure
//! reducer, with delayed removal after dismissal and synchronous
//! publication of every new state to subscribers.
//!
//! # Role in qline
//! Form handlers and other event callbacks raise toasts through a
//! [`Toaster`]; the rendering layer subscribes (or calls
//! [`Toaster::use_state`]) and draws whatever is listed. Toasts that were
//! dismissed stay listed, closed, until their removal timer fires.

pub mod reducer;
pub mod toast;
pub mod toaster;

pub use reducer::{QueueAction, ToastState, reduce};
pub use toast::{
    ActionDescriptor, ID_MODULUS, IdGenerator, Toast, ToastId, ToastPatch, ToastProps,
    ToastVariant,
};
pub use toaster::{
    TOAST_LIMIT, TOAST_REMOVE_DELAY, ToastHandle, ToastView, Toaster, ToasterConfig,
};
