//! Error types for routever

use thiserror::Error;

/// Result type alias for routever operations
pub type Result<T, E = VersionError> = std::result::Result<T, E>;

/// Errors raised while building or applying version filtering.
///
/// Missing version information is never an error: an empty resolver chain,
/// a resolver that finds nothing and a route without a declared version are
/// all plain `None` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// A required argument was absent.
    #[error("Invalid argument: `{0}` must not be absent")]
    InvalidArgument(&'static str),

    /// A route could not be registered.
    #[error("Route conflict on `{path}`: {details}")]
    RouteConflict {
        /// The path pattern being registered
        path: String,
        /// Why the registration was rejected
        details: String,
    },
}

impl VersionError {
    /// Create a route conflict error
    pub fn route_conflict(path: impl Into<String>, details: impl Into<String>) -> Self {
        Self::RouteConflict {
            path: path.into(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = VersionError::InvalidArgument("request");
        assert_eq!(err.to_string(), "Invalid argument: `request` must not be absent");
    }

    #[test]
    fn test_route_conflict_display() {
        let err = VersionError::route_conflict("/users/{id}", "version 1 already registered");
        assert_eq!(
            err.to_string(),
            "Route conflict on `/users/{id}`: version 1 already registered"
        );
    }
}
