//! # routever-extras
//!
//! Optional utilities around routever, opt-in via Cargo feature flags.
//!
//! ## Features
//!
//! - `config` - Versioning configuration from environment variables and `.env` files
//! - `logging` - Global `tracing` subscriber setup
//! - `full` - All features enabled
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! routever-extras = { version = "0.1", features = ["config", "logging"] }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Configuration loading module
#[cfg(feature = "config")]
pub mod config;

// Logging setup module
#[cfg(feature = "logging")]
pub mod logging;

// Re-exports for convenience
#[cfg(feature = "config")]
pub use config::{
    load_config, load_dotenv, load_dotenv_from, ConfigError, VersioningSettings, ENV_PREFIX,
};

#[cfg(feature = "logging")]
pub use logging::{init_default_logging, init_logging};
