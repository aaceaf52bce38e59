//! Logging setup.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and a fmt
//! layer. `RUST_LOG` wins over the directive passed in, so version decisions
//! can be traced in production with `RUST_LOG=routever_core=debug`.
//!
//! # Example
//!
//! ```ignore
//! use routever_extras::logging::init_logging;
//!
//! init_logging("info,routever_core=debug");
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used by [`init_default_logging`]
pub const DEFAULT_DIRECTIVE: &str = "info,routever_core=debug";

/// Install the global subscriber.
///
/// Returns `false` when a global subscriber was already set; the existing
/// one is left untouched.
pub fn init_logging(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Install the global subscriber with [`DEFAULT_DIRECTIVE`]
pub fn init_default_logging() -> bool {
    init_logging(DEFAULT_DIRECTIVE)
}
