//! Query parameter version resolution

use super::{non_blank, RequestVersionResolver};
use crate::request::Request;
use serde::{Deserialize, Serialize};

/// Query parameter read by default: `api-version`
pub const DEFAULT_VERSION_PARAMETER: &str = "api-version";

/// Configuration for [`ParameterVersionResolver`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterVersionResolverConfig {
    /// Whether query parameter resolution is active
    pub enabled: bool,
    /// Parameter names to read, in priority order
    pub names: Vec<String>,
}

impl Default for ParameterVersionResolverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            names: vec![DEFAULT_VERSION_PARAMETER.to_string()],
        }
    }
}

impl ParameterVersionResolverConfig {
    /// Create an enabled configuration reading the given parameters
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
}

/// Resolves the version from the URI query string.
///
/// The query is decoded as `application/x-www-form-urlencoded`. Parameter
/// names are matched exactly; a query that fails to decode resolves nothing.
#[derive(Debug, Clone)]
pub struct ParameterVersionResolver {
    names: Vec<String>,
}

impl ParameterVersionResolver {
    /// Create a resolver reading the given parameters
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
    pub fn from_config(config: &ParameterVersionResolverConfig) -> Self {
        Self::new(config.names.iter().cloned())
    }

    /// The parameter names this resolver reads
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for ParameterVersionResolver {
    fn default() -> Self {
        Self::from_config(&ParameterVersionResolverConfig::default())
    }
}

impl RequestVersionResolver for ParameterVersionResolver {
    fn resolve(&self, request: &Request) -> Option<String> {
        let query = request.query_string()?;
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;

        self.names.iter().find_map(|name| {
            pairs
                .iter()
                .filter(|(key, _)| key == name)
                .find_map(|(_, value)| non_blank(value))
        })
    }
}
