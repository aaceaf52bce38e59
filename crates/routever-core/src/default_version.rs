//! Fallback version used when no resolver finds one

/// Supplies the version a request falls back to when the resolver chain
/// finds nothing.
pub trait DefaultVersionProvider: Send + Sync {
    /// The default version
    fn default_version(&self) -> String;
}

impl<F> DefaultVersionProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn default_version(&self) -> String {
        self()
    }
}

/// A fixed default version, typically read from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDefaultVersion(String);

impl StaticDefaultVersion {
    /// Create a provider for `version`
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl DefaultVersionProvider for StaticDefaultVersion {
    fn default_version(&self) -> String {
        self.0.clone()
    }
}
