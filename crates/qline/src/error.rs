#![forbid(unsafe_code)]

//! Error types for site construction and configuration.
//!
//! Nothing here covers the runtime paths: a missing translation renders as
//! its key and an unknown toast id is ignored. Errors only arise while the
//! composition root is being assembled.

use qline_i18n::I18nError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SiteError>;

/// Failure loading or validating a [`SiteConfig`](crate::config::SiteConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Failure assembling a [`Site`](crate::site::Site).
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("dictionary: {0}")]
    I18n(#[from] I18nError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn validation_lists_every_problem() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }

    #[test]
    fn site_error_wraps_sources() {
        let err = SiteError::from(I18nError::DuplicateKey("nav.home".into()));
        assert_eq!(
            err.to_string(),
            "dictionary: duplicate translation key 'nav.home'"
        );
        assert!(err.source().is_some());

        let err = SiteError::from(ConfigError::Validation(vec!["x".into()]));
        assert!(matches!(err, SiteError::Config(ConfigError::Validation(_))));
    }
}
