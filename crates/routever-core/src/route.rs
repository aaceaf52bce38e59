//! Candidate route matches carrying a declared version

use std::collections::HashMap;

/// Access to the version a route declared at registration time.
///
/// Implemented by [`RouteMatch`]; routing engines with their own match type
/// implement it to plug into [`RouteVersionFilter`](crate::RouteVersionFilter).
pub trait VersionedMatch {
    /// The declared version, if the route has one
    fn declared_version(&self) -> Option<&str>;
}

impl<M: VersionedMatch + ?Sized> VersionedMatch for &M {
    fn declared_version(&self) -> Option<&str> {
        (**self).declared_version()
    }
}

/// A candidate binding between a request and a handler.
///
/// The declared version is set once when the route is registered and is
/// never recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<H> {
    handler: H,
    params: HashMap<String, String>,
    version: Option<String>,
}

impl<H> RouteMatch<H> {
    /// Create an unversioned match with no path parameters
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            params: HashMap::new(),
            version: None,
        }
    }

    /// Set the declared version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the path parameters
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Add a single path parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Get the handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Consume the match, returning the handler
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Get path parameters
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Get a specific path parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Get the declared version
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl<H> VersionedMatch for RouteMatch<H> {
    fn declared_version(&self) -> Option<&str> {
        self.version()
    }
}
