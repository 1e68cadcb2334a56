#![forbid(unsafe_code)]

//! Composition root.
//!
//! A [`Site`] owns one timer queue, one translator and one toast queue, and
//! hands out references to them. Page glue receives these explicitly; there
//! is no global state.

use std::rc::Rc;

use qline_i18n::{Dictionary, Translator};
use qline_runtime::{RealtimeDriver, TimerQueue};
use qline_toast::Toaster;
use tracing::info;

use crate::config::SiteConfig;
use crate::error::Result;
use crate::strings::site_dictionary;

/// The assembled in-process core of the site.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    timers: TimerQueue,
    translator: Translator,
    toaster: Toaster,
}

impl Site {
    /// Validate `config` and assemble the site around the shipped dictionary.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let dictionary = site_dictionary()?;
        Self::with_dictionary(config, dictionary)
    }

    /// Validate `config` and assemble the site around `dictionary`.
    pub fn with_dictionary(config: SiteConfig, dictionary: Dictionary) -> Result<Self> {
        config.validate()?;
        let timers = TimerQueue::new();
        let translator = Translator::with_language(Rc::new(dictionary), config.default_language);
        let toaster = Toaster::new(config.toast.clone(), timers.clone());
        info!(
            language = %config.default_language,
            keys = translator.dictionary().len(),
            toast_limit = config.toast.limit,
            "site assembled"
        );
        Ok(Self {
            config,
            timers,
            translator,
            toaster,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    #[must_use]
    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// The timer queue removal timers are scheduled on.
    #[must_use]
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Wall-clock pump for this site's timers, starting now.
    #[must_use]
    pub fn driver(&self) -> RealtimeDriver {
        RealtimeDriver::new(self.timers.clone())
    }

    /// Cancel pending removals and clear the toast queue. Returns the number
    /// of timers cancelled.
    pub fn teardown(&self) -> usize {
        self.toaster.teardown()
    }
}
