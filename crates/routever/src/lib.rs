//! # routever
//!
//! API version negotiation for HTTP routing.
//!
//! Several handlers may share a path and method while declaring different
//! API versions. routever resolves the version a request asks for (from a
//! header, a query parameter, or any custom resolver, with a configurable
//! default) and keeps only the candidate routes that fit it.
//!
//! ## Quick Start
//!
//! ```rust
//! use routever::prelude::*;
//!
//! let config = RoutesVersioningConfig::enabled()
//!     .header(HeaderVersionResolverConfig::with_names(["X-API-Version"]))
//!     .default_version("1");
//! let filter = RouteVersionFilter::from_config(&config);
//!
//! let mut routes = RouteTable::new();
//! routes.insert_versioned(Method::GET, "/users", "1", "list_users_v1").unwrap();
//! routes.insert_versioned(Method::GET, "/users", "2", "list_users_v2").unwrap();
//!
//! let request = Request::from(
//!     http::Request::builder()
//!         .uri("/users")
//!         .header("X-API-Version", "2")
//!         .body(())
//!         .unwrap(),
//! );
//! let found = routes.route(&request, &filter).unwrap();
//! assert_eq!(**found.handler(), "list_users_v2");
//! ```
//!
//! ## Optional Features
//!
//! - `tracing` (default) - Debug events for every version decision
//! - `config` - Load [`RoutesVersioningConfig`] from `ROUTEVER_*` environment variables
//! - `logging` - Install a global `tracing` subscriber
//! - `full` - All optional features enabled

// Re-export core functionality
pub use routever_core::*;

// Re-export http for building requests
pub use http;

// Re-export extras (feature-gated)
#[cfg(feature = "config")]
pub use routever_extras::config;
#[cfg(feature = "config")]
pub use routever_extras::{load_config, load_dotenv, ConfigError, VersioningSettings};

#[cfg(feature = "logging")]
pub use routever_extras::logging;
#[cfg(feature = "logging")]
pub use routever_extras::{init_default_logging, init_logging};

/// Prelude module - import everything you need with `use routever::prelude::*`
pub mod prelude {
    pub use crate::http::Method;
    pub use crate::resolution::{
        FixedVersionResolver, HeaderVersionResolver, HeaderVersionResolverConfig,
        ParameterVersionResolver, ParameterVersionResolverConfig,
    };
    pub use crate::{
        DefaultVersionProvider, Request, RequestVersionResolver, ResolverChain, RouteMatch,
        RouteTable, RouteVersionFilter, RoutesVersioningConfig, StaticDefaultVersion,
        UnresolvedVersionPolicy, VersionError, VersionPredicate, VersionedMatch,
    };
}
