#![forbid(unsafe_code)]

//! Site configuration.
//!
//! Every field has a default matching the shipped behaviour, so
//! `SiteConfig::default()` is always a valid configuration.
//!
//! # Loading
//!
//! ```toml
//! # qline.toml
//! default_language = "fr"
//!
//! [toast]
//! limit = 1
//! remove_delay_ms = 1000000
//! ```
//!
//! ```rust,ignore
//! let config = SiteConfig::from_toml_file("qline.toml")?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

use qline_i18n::Language;
use qline_runtime::Duration;
use qline_toast::ToasterConfig;

use crate::error::ConfigError;

/// Everything the composition root needs to assemble a [`Site`](crate::Site).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// Language selected at start-up.
    pub default_language: Language,
    /// Toast queue capacity and removal delay.
    pub toast: ToasterConfig,
}

impl SiteConfig {
    /// Set the start-up language.
    #[must_use]
    pub fn default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Set the toast configuration.
    #[must_use]
    pub fn toast(mut self, toast: ToasterConfig) -> Self {
        self.toast = toast;
        self
    }

    /// Check the configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let problems = self.toast.validate();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }
}

#[cfg(feature = "config")]
mod file {
    use serde::Deserialize;

    use super::{Duration, Language, SiteConfig};

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    pub(super) struct ConfigFile {
        default_language: Option<Language>,
        toast: ToastSection,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct ToastSection {
        limit: Option<usize>,
        remove_delay_ms: Option<u64>,
    }

    impl ConfigFile {
        pub(super) fn into_config(self) -> SiteConfig {
            let mut config = SiteConfig::default();
            if let Some(language) = self.default_language {
                config.default_language = language;
            }
            if let Some(limit) = self.toast.limit {
                config.toast.limit = limit;
            }
            if let Some(ms) = self.toast.remove_delay_ms {
                config.toast.remove_delay = Duration::from_millis(ms);
            }
            config
        }
    }
}

#[cfg(feature = "config")]
impl SiteConfig {
    /// Load from a TOML string. Missing fields keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: file::ConfigFile = toml::from_str(s)?;
        let config = file.into_config();
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let file: file::ConfigFile = serde_json::from_str(s)?;
        let config = file.into_config();
        config.validate()?;
        Ok(config)
    }
}
