#![forbid(unsafe_code)]

//! qline: the in-process core of the Smart Queue Management site.
//!
//! This crate wires the translation store ([`qline_i18n`]) and the toast
//! queue ([`qline_toast`]) into a [`Site`], and carries the small amount of
//! page glue that calls into them: the routing table, the shipped
//! dictionary and the simulated contact form.
//!
//! # Example
//!
//! ```
//! use qline::prelude::*;
//!
//! let site = Site::new(SiteConfig::default()).unwrap();
//! site.translator().set_language(Language::French);
//! assert_eq!(Page::from_path("/").title(site.translator()), "Gestion intelligente des files");
//!
//! let mut form = ContactForm::new()
//!     .name("Ada")
//!     .email("ada@example.com")
//!     .message("Bonjour");
//! let handle = form.submit(site.translator(), site.toaster()).unwrap();
//! assert_eq!(site.toaster().state().get(handle.id()).unwrap().title(), Some("Message envoyé"));
//! ```
//!
//! # Feature Flags
//!
//! - `config` (default): load [`SiteConfig`] from TOML or JSON.
//! - `logging`: [`logging::init`] on `tracing-subscriber`.
//! - `demo`: builds the `qline-demo` binary.

pub mod config;
pub mod contact;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod pages;
pub mod site;
pub mod strings;

pub use config::SiteConfig;
pub use contact::{ContactForm, Field, FieldError};
pub use error::{ConfigError, Result, SiteError};
pub use pages::Page;
pub use site::Site;
pub use strings::site_dictionary;

pub use qline_i18n as i18n;
pub use qline_runtime as runtime;
pub use qline_toast as toast;

/// Everything page glue usually needs.
pub mod prelude {
    pub use crate::{ContactForm, Page, Site, SiteConfig, SiteError};
    pub use qline_i18n::{Language, Translator};
    pub use qline_runtime::{Duration, Subscription, TimerQueue};
    pub use qline_toast::{
        Toast, ToastHandle, ToastId, ToastPatch, ToastProps, ToastVariant, Toaster,
        ToasterConfig,
    };
}
