//! Ordered, first-match-wins resolver chain

use super::RequestVersionResolver;
use crate::request::Request;
use std::fmt;
use std::sync::Arc;

/// Ordered list of resolvers.
///
/// Assembled once at startup and read-only afterwards. Cloning is cheap: the
/// resolvers themselves are shared.
#[derive(Clone, Default)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn RequestVersionResolver>>,
}

impl ResolverChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain from already shared resolvers, keeping their order
    pub fn from_resolvers(resolvers: Vec<Arc<dyn RequestVersionResolver>>) -> Self {
        Self { resolvers }
    }

    /// Append a resolver; it is consulted after every resolver already added
    pub fn with<R>(mut self, resolver: R) -> Self
    where
        R: RequestVersionResolver + 'static,
    {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    /// Append an already shared resolver
    pub fn with_shared(mut self, resolver: Arc<dyn RequestVersionResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Number of resolvers in the chain
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Check if the chain has no resolvers
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolve the requested version.
    ///
    /// Resolvers are asked in order. The first non-empty value wins and the
    /// remaining resolvers are not called.
    pub fn resolve(&self, request: &Request) -> Option<String> {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver.resolve(request).filter(|v| !v.is_empty()))
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}
