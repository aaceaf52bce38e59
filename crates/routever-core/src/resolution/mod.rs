//! Resolution of the version a request asks for
//!
//! A [`RequestVersionResolver`] looks at a request and either finds a version
//! string or reports nothing. Resolvers are combined into a
//! [`ResolverChain`], which asks them in order and stops at the first one
//! that produces a non-empty value.
//!
//! # Example
//!
//! ```rust
//! use routever_core::resolution::{HeaderVersionResolver, ResolverChain};
//! use routever_core::Request;
//!
//! let chain = ResolverChain::new()
//!     .with(HeaderVersionResolver::default())
//!     .with(|req: &Request| req.header("x-legacy-version").map(str::to_string));
//!
//! let req = Request::from(
//!     http::Request::builder()
//!         .uri("/users")
//!         .header("X-API-VERSION", "2")
//!         .body(())
//!         .unwrap(),
//! );
//! assert_eq!(chain.resolve(&req), Some("2".to_string()));
//! ```

mod chain;
mod header;
mod parameter;

pub use chain::ResolverChain;
pub use header::{HeaderVersionResolver, HeaderVersionResolverConfig, DEFAULT_VERSION_HEADER};
pub use parameter::{
    ParameterVersionResolver, ParameterVersionResolverConfig, DEFAULT_VERSION_PARAMETER,
};

use crate::request::Request;

/// Extracts the requested version from a request.
///
/// Implementations must be free of side effects and must not block: the
/// filter calls them inline on the request path, possibly from many threads
/// at once.
pub trait RequestVersionResolver: Send + Sync {
    /// Resolve a version, or `None` when the request carries no version
    fn resolve(&self, request: &Request) -> Option<String>;
}

impl<F> RequestVersionResolver for F
where
    F: Fn(&Request) -> Option<String> + Send + Sync,
{
    fn resolve(&self, request: &Request) -> Option<String> {
        self(request)
    }
}

/// Resolver that always returns the same version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedVersionResolver {
    version: String,
}

impl FixedVersionResolver {
    /// Create a resolver pinned to `version`
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl RequestVersionResolver for FixedVersionResolver {
    fn resolve(&self, _request: &Request) -> Option<String> {
        Some(self.version.clone())
    }
}

/// Keep a resolved value only if it is not blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
