//! Versioning configuration from environment variables.
//!
//! Settings are read once at startup from `ROUTEVER_`-prefixed variables,
//! optionally seeded from a `.env` file, and turned into a
//! [`RoutesVersioningConfig`].
//!
//! | Variable                     | Meaning                                   |
//! |------------------------------|-------------------------------------------|
//! | `ROUTEVER_ENABLED`           | enable versioning (`false`)               |
//! | `ROUTEVER_DEFAULT_VERSION`   | version used when a request has none      |
//! | `ROUTEVER_HEADER_ENABLED`    | resolve from headers (`false`)            |
//! | `ROUTEVER_HEADER_NAMES`      | comma separated header names              |
//! | `ROUTEVER_PARAMETER_ENABLED` | resolve from query parameters (`false`)   |
//! | `ROUTEVER_PARAMETER_NAMES`   | comma separated parameter names           |
//! | `ROUTEVER_STRICT`            | discard versioned routes when unresolved  |
//!
//! # Example
//!
//! ```ignore
//! use routever_extras::config::{load_dotenv, VersioningSettings};
//! use routever_core::RouteVersionFilter;
//!
//! load_dotenv();
//! let config = VersioningSettings::from_env()?.into_config()?;
//! let filter = RouteVersionFilter::from_config(&config);
//! ```

use routever_core::resolution::{
    HeaderVersionResolverConfig, ParameterVersionResolverConfig,
};
use routever_core::{RoutesVersioningConfig, UnresolvedVersionPolicy};
use serde::Deserialize;
use std::fmt;

/// Prefix of every variable read by [`VersioningSettings::from_env`]
pub const ENV_PREFIX: &str = "ROUTEVER_";

/// Error type for configuration loading failures.
#[derive(Debug)]
pub enum ConfigError {
    /// Environment variable deserialization failed.
    EnvyError(envy::Error),
    /// A variable was present but its value is unusable.
    InvalidValue {
        /// Name of the offending setting
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvyError(e) => write!(f, "Configuration error: {}", e),
            ConfigError::InvalidValue { name, reason } => {
                write!(f, "Invalid value for {}: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::EnvyError(e) => Some(e),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<envy::Error> for ConfigError {
    fn from(err: envy::Error) -> Self {
        ConfigError::EnvyError(err)
    }
}

/// Flat versioning settings as they appear in the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersioningSettings {
    /// Enable versioning
    pub enabled: bool,
    /// Version used when a request carries none
    pub default_version: Option<String>,
    /// Enable header resolution
    pub header_enabled: bool,
    /// Header names, `X-API-VERSION` when unset
    pub header_names: Option<Vec<String>>,
    /// Enable query parameter resolution
    pub parameter_enabled: bool,
    /// Parameter names, `api-version` when unset
    pub parameter_names: Option<Vec<String>>,
    /// Discard versioned routes when no version is resolved
    pub strict: bool,
}

impl VersioningSettings {
    /// Load settings from `ROUTEVER_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed into its field type.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_prefixed(ENV_PREFIX)
    }

    /// Load settings from environment variables starting with `prefix`.
    pub fn from_env_prefixed(prefix: &str) -> Result<Self, ConfigError> {
        envy::prefixed(prefix)
            .from_env::<Self>()
            .map_err(ConfigError::from)
    }

    /// Validate the settings and convert them into a
    /// [`RoutesVersioningConfig`].
    ///
    /// # Errors
    ///
    /// Rejects a blank default version and blank resolver names.
    pub fn into_config(self) -> Result<RoutesVersioningConfig, ConfigError> {
        let default_version = match self.default_version {
            Some(version) if version.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    name: "default_version",
                    reason: "must not be blank".to_string(),
                })
            }
            Some(version) => Some(version.trim().to_string()),
            None => None,
        };

        let header = match self.header_names {
            Some(names) => HeaderVersionResolverConfig {
                enabled: self.header_enabled,
                names: validate_names("header_names", names)?,
            },
            None => HeaderVersionResolverConfig {
                enabled: self.header_enabled,
                ..HeaderVersionResolverConfig::default()
            },
        };

        let parameter = match self.parameter_names {
            Some(names) => ParameterVersionResolverConfig {
                enabled: self.parameter_enabled,
                names: validate_names("parameter_names", names)?,
            },
            None => ParameterVersionResolverConfig {
                enabled: self.parameter_enabled,
                ..ParameterVersionResolverConfig::default()
            },
        };

        let unresolved_policy = if self.strict {
            UnresolvedVersionPolicy::Strict
        } else {
            UnresolvedVersionPolicy::Permissive
        };

        let config = RoutesVersioningConfig {
            enabled: self.enabled,
            default_version,
            header: Some(header),
            parameter: Some(parameter),
            unresolved_policy,
        };
        tracing::debug!(?config, "Loaded routes versioning configuration");
        Ok(config)
    }
}

fn validate_names(name: &'static str, names: Vec<String>) -> Result<Vec<String>, ConfigError> {
    let names: Vec<String> = names.into_iter().map(|n| n.trim().to_string()).collect();
    if names.is_empty() || names.iter().any(String::is_empty) {
        return Err(ConfigError::InvalidValue {
            name,
            reason: "names must be non-empty".to_string(),
        });
    }
    Ok(names)
}

/// Load `.env`, read the settings and convert them in one step.
///
/// # Errors
///
/// Propagates errors from [`VersioningSettings::from_env`] and
/// [`VersioningSettings::into_config`].
pub fn load_config() -> Result<RoutesVersioningConfig, ConfigError> {
    load_dotenv();
    VersioningSettings::from_env()?.into_config()
}

/// Load environment variables from a `.env` file.
///
/// Missing files are ignored and existing variables take precedence.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Load environment variables from a specific file path.
pub fn load_dotenv_from<P: AsRef<std::path::Path>>(path: P) {
    let _ = dotenvy::from_path(path);
}
