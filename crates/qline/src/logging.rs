#![forbid(unsafe_code)]

//! Subscriber setup for binaries.
//!
//! Library code only emits `tracing` events; whoever owns `main` decides
//! where they go. The filter is read from `QLINE_LOG` using the usual
//! `EnvFilter` directive syntax (`qline_toast=debug,warn`).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "QLINE_LOG";

/// Filter used when `QLINE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `QLINE_LOG`, falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a formatting subscriber on stderr. Does nothing if a global
/// subscriber is already set.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
