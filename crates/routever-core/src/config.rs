//! Routes versioning configuration
//!
//! Loaded once at startup and read-only afterwards. Loading from the
//! environment lives in `routever-extras` behind the `config` feature; this
//! module only holds the typed settings.

use crate::resolution::{
    HeaderVersionResolver, HeaderVersionResolverConfig, ParameterVersionResolver,
    ParameterVersionResolverConfig, ResolverChain,
};
use serde::{Deserialize, Serialize};

/// What to do with a versioned route when the request resolved no version
/// and no default is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedVersionPolicy {
    /// Keep the route, so versioning can be rolled out gradually
    #[default]
    Permissive,
    /// Discard the route
    Strict,
}

/// Settings for version-based route filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesVersioningConfig {
    /// Whether versioning is enabled at all
    pub enabled: bool,
    /// Version assumed when a request carries none
    pub default_version: Option<String>,
    /// Header resolution settings
    pub header: Option<HeaderVersionResolverConfig>,
    /// Query parameter resolution settings
    pub parameter: Option<ParameterVersionResolverConfig>,
    /// Handling of versioned routes when nothing was resolved
    pub unresolved_policy: UnresolvedVersionPolicy,
}

impl RoutesVersioningConfig {
    /// Create an enabled configuration with no resolvers
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Set the default version
    pub fn default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = Some(version.into());
        self
    }

    /// Set the header resolution settings
    pub fn header(mut self, config: HeaderVersionResolverConfig) -> Self {
        self.header = Some(config);
        self
    }

    /// Set the query parameter resolution settings
    pub fn parameter(mut self, config: ParameterVersionResolverConfig) -> Self {
        self.parameter = Some(config);
        self
    }

    /// Set the unresolved version policy
    pub fn unresolved_policy(mut self, policy: UnresolvedVersionPolicy) -> Self {
        self.unresolved_policy = policy;
        self
    }

    /// Header settings, only when present and enabled
    pub fn active_header(&self) -> Option<&HeaderVersionResolverConfig> {
        self.header.as_ref().filter(|header| header.enabled)
    }

    /// Query parameter settings, only when present and enabled
    pub fn active_parameter(&self) -> Option<&ParameterVersionResolverConfig> {
        self.parameter.as_ref().filter(|parameter| parameter.enabled)
    }

    /// Build the resolver chain: header resolution first, then query
    /// parameters. Disabled sections contribute nothing.
    pub fn resolvers(&self) -> ResolverChain {
        let mut chain = ResolverChain::new();
        if let Some(header) = self.active_header() {
            chain = chain.with(HeaderVersionResolver::from_config(header));
        }
        if let Some(parameter) = self.active_parameter() {
            chain = chain.with(ParameterVersionResolver::from_config(parameter));
        }
        chain
    }
}
