//! Header-based version resolution

use super::{non_blank, RequestVersionResolver};
use crate::request::Request;
use serde::{Deserialize, Serialize};

/// Header read by default: `X-API-VERSION`
pub const DEFAULT_VERSION_HEADER: &str = "X-API-VERSION";

/// Configuration for [`HeaderVersionResolver`].
///
/// The header names are also used to decide whether a CORS preflight
/// announced a version header (see
/// [`RouteVersionFilter`](crate::RouteVersionFilter)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderVersionResolverConfig {
    /// Whether header resolution is active
    pub enabled: bool,
    /// Header names to read, in priority order
    pub names: Vec<String>,
}

impl Default for HeaderVersionResolverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            names: vec![DEFAULT_VERSION_HEADER.to_string()],
        }
    }
}

impl HeaderVersionResolverConfig {
    /// Create an enabled configuration reading the given headers
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether `header` is one of the configured names (case-insensitive)
    pub fn recognizes(&self, header: &str) -> bool {
        self.names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(header))
    }
}

/// Resolves the version from request headers.
///
/// Configured names are tried in order; for each name every occurrence of
/// the header is considered and the first non-blank value wins.
#[derive(Debug, Clone)]
pub struct HeaderVersionResolver {
    names: Vec<String>,
}

impl HeaderVersionResolver {
    /// Create a resolver reading the given headers
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a resolver from its configuration
    pub fn from_config(config: &HeaderVersionResolverConfig) -> Self {
        Self::new(config.names.iter().cloned())
    }

    /// The header names this resolver reads
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for HeaderVersionResolver {
    fn default() -> Self {
        Self::from_config(&HeaderVersionResolverConfig::default())
    }
}

impl RequestVersionResolver for HeaderVersionResolver {
    fn resolve(&self, request: &Request) -> Option<String> {
        self.names
            .iter()
            .find_map(|name| request.header_values(name).find_map(non_blank))
    }
}
