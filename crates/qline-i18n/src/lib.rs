#![forbid(unsafe_code)]

//! Translation store for the qline site.
//!
//! Provides a static key-based dictionary over a closed set of three
//! languages, a resolver with primary-language fallback, and `{name}`
//! interpolation.
//!
//! # Role in qline
//! `qline-i18n` isolates localization so page glue and notification text can
//! resolve strings without knowing which language is selected. It does not
//! depend on the toast or runtime crates.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use qline_i18n::{Dictionary, Language, TranslationEntry, Translator};
//!
//! let dict = Dictionary::builder()
//!     .entry("nav.home", TranslationEntry::new("Home").with(Language::French, "Accueil"))
//!     .build()
//!     .unwrap();
//! let t = Translator::new(Rc::new(dict));
//! t.set_language(Language::French);
//! assert_eq!(t.t("nav.home"), "Accueil");
//! assert_eq!(t.t("nav.missing"), "nav.missing");
//! ```

pub mod catalog;
pub mod language;
pub mod translator;

pub use catalog::{
    CoverageReport, Dictionary, DictionaryBuilder, I18nError, LanguageCoverage, TranslationEntry,
};
pub use language::Language;
pub use translator::{Translator, interpolate};
