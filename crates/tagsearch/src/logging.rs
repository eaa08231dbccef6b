//! Logging setup for hosts that do not install their own subscriber.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed, either by the host or through [`init`].

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize tracing with the default `info` filter.
///
/// The filter can be overridden with `RUST_LOG`:
/// - RUST_LOG=tagsearch=debug
/// - RUST_LOG=tagsearch=trace
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with a custom default filter.
///
/// Only the first call has any effect, and an already-installed global
/// subscriber is left in place.
pub fn init_with_filter(default_filter: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
            .is_ok();
        if installed {
            debug!("tagsearch logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init_with_filter("warn");
        init();
        init();
    }
}
