//! Filtering of candidate route matches by API version
//!
//! [`RouteVersionFilter`] is built once at startup. For every request it
//! resolves the requested version a single time and hands back a
//! [`VersionPredicate`] that the routing engine applies to each candidate.
//!
//! # Matching policy
//!
//! | route version | resolved version | decision                      |
//! |---------------|------------------|-------------------------------|
//! | none          | none             | retain                        |
//! | none          | some             | discard                       |
//! | some          | none             | retain (unless policy strict) |
//! | some          | some             | retain iff equal              |
//!
//! For unversioned routes only the resolver chain counts. For versioned
//! routes the default version stands in when the chain finds nothing.
//!
//! CORS preflights against versioned routes are always retained, unless
//! versioning is enabled, header resolution is configured and the preflight
//! lists one of the configured headers in `Access-Control-Request-Headers`.
//!
//! # Example
//!
//! ```rust
//! use routever_core::{RouteMatch, RouteVersionFilter, Request, RoutesVersioningConfig};
//! use routever_core::resolution::HeaderVersionResolverConfig;
//!
//! let config = RoutesVersioningConfig::enabled()
//!     .header(HeaderVersionResolverConfig::with_names(["X-API-Version"]));
//! let filter = RouteVersionFilter::from_config(&config);
//!
//! let request = Request::from(
//!     http::Request::builder()
//!         .uri("/users")
//!         .header("X-API-Version", "2")
//!         .body(())
//!         .unwrap(),
//! );
//!
//! let candidates = vec![
//!     RouteMatch::new("users_v1").with_version("1"),
//!     RouteMatch::new("users_v2").with_version("2"),
//! ];
//! let retained = filter.filter(&request).retain(candidates);
//! assert_eq!(retained.len(), 1);
//! assert_eq!(*retained[0].handler(), "users_v2");
//! ```

use crate::config::{RoutesVersioningConfig, UnresolvedVersionPolicy};
use crate::default_version::{DefaultVersionProvider, StaticDefaultVersion};
use crate::error::{Result, VersionError};
use crate::request::Request;
use crate::resolution::{HeaderVersionResolverConfig, ResolverChain};
use crate::route::VersionedMatch;
use std::fmt;
use std::sync::Arc;

/// Decide whether an unversioned route is retained.
///
/// Only a request that resolved no version may reach an unversioned route.
pub fn matches_unversioned(resolved: Option<&str>) -> bool {
    resolved.is_none()
}

/// Decide whether a versioned route is retained.
///
/// `resolved` is the chain result, or the default version when the chain
/// found nothing.
pub fn matches_versioned(
    route_version: &str,
    resolved: Option<&str>,
    policy: UnresolvedVersionPolicy,
) -> bool {
    match resolved {
        Some(version) => version == route_version,
        None => policy == UnresolvedVersionPolicy::Permissive,
    }
}

/// Filters route matches on their declared version.
///
/// Immutable once built; share it across worker threads behind an `Arc`.
#[derive(Clone, Default)]
pub struct RouteVersionFilter {
    resolvers: ResolverChain,
    default_version: Option<Arc<dyn DefaultVersionProvider>>,
    versioning: Option<RoutesVersioningConfig>,
    header: Option<HeaderVersionResolverConfig>,
    policy: UnresolvedVersionPolicy,
}

impl RouteVersionFilter {
    /// Create a filter consulting `resolvers` in order
    pub fn new(resolvers: ResolverChain) -> Self {
        Self {
            resolvers,
            ..Self::default()
        }
    }

    /// Create a filter wired entirely from configuration.
    ///
    /// Resolvers come from the enabled header and parameter sections, the
    /// default version becomes a static provider, and the header section is
    /// used for preflight handling.
    pub fn from_config(config: &RoutesVersioningConfig) -> Self {
        let mut filter = Self::new(config.resolvers())
            .versioning_config(config.clone())
            .unresolved_policy(config.unresolved_policy);
        if let Some(version) = &config.default_version {
            filter = filter.default_version(StaticDefaultVersion::new(version.clone()));
        }
        if let Some(header) = config.active_header() {
            filter = filter.header_config(header.clone());
        }
        filter
    }

    /// Set the default version provider
    pub fn default_version<P>(mut self, provider: P) -> Self
    where
        P: DefaultVersionProvider + 'static,
    {
        self.default_version = Some(Arc::new(provider));
        self
    }

    /// Set the routes versioning configuration.
    ///
    /// A configuration with `enabled = false` turns the filter into a
    /// pass-through.
    pub fn versioning_config(mut self, config: RoutesVersioningConfig) -> Self {
        self.versioning = Some(config);
        self
    }

    /// Set the header resolution settings used for preflight handling
    pub fn header_config(mut self, config: HeaderVersionResolverConfig) -> Self {
        self.header = Some(config);
        self
    }

    /// Set the unresolved version policy
    pub fn unresolved_policy(mut self, policy: UnresolvedVersionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The resolver chain
    pub fn resolvers(&self) -> &ResolverChain {
        &self.resolvers
    }

    /// Whether every match is retained regardless of version
    pub fn is_pass_through(&self) -> bool {
        self.resolvers.is_empty()
            || self
                .versioning
                .as_ref()
                .is_some_and(|config| !config.enabled)
    }

    /// Resolve the version requested by `request`, without the default
    pub fn resolve_version(&self, request: &Request) -> Option<String> {
        self.resolvers.resolve(request)
    }

    /// Build the decision predicate for `request`.
    ///
    /// Resolution happens here, once; the returned predicate only compares.
    pub fn filter<'r>(&self, request: &'r Request) -> VersionPredicate<'r> {
        if self.is_pass_through() {
            trace_trace!(uri = %request.uri(), "Version filtering disabled, retaining all routes");
            return VersionPredicate {
                request,
                decision: Decision::PassThrough,
            };
        }

        let resolved = self.resolve_version(request);
        let fallback = match (&resolved, &self.default_version) {
            (None, Some(provider)) => Some(provider.default_version()),
            _ => None,
        };
        let preflight_exempt = request.is_preflight() && !self.preflight_announces_version(request);

        VersionPredicate {
            request,
            decision: Decision::Evaluate {
                resolved,
                fallback,
                preflight_exempt,
                policy: self.policy,
            },
        }
    }

    /// Build the decision predicate for a request that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidArgument`] when `request` is `None`;
    /// no resolver is consulted in that case.
    pub fn try_filter<'r>(&self, request: Option<&'r Request>) -> Result<VersionPredicate<'r>> {
        request
            .map(|request| self.filter(request))
            .ok_or(VersionError::InvalidArgument("request"))
    }

    /// A preflight announces a version header when versioning is enabled,
    /// header resolution is configured, and one of its header names is
    /// listed in `Access-Control-Request-Headers`.
    fn preflight_announces_version(&self, request: &Request) -> bool {
        let enabled = self.versioning.as_ref().is_some_and(|config| config.enabled);
        match (&self.header, enabled) {
            (Some(header), true) => request
                .access_control_request_headers()
                .any(|name| header.recognizes(name)),
            _ => false,
        }
    }
}

impl fmt::Debug for RouteVersionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteVersionFilter")
            .field("resolvers", &self.resolvers)
            .field("default_version", &self.default_version.is_some())
            .field("versioning", &self.versioning)
            .field("header", &self.header)
            .field("policy", &self.policy)
            .finish()
    }
}

#[derive(Debug, Clone)]
enum Decision {
    PassThrough,
    Evaluate {
        resolved: Option<String>,
        fallback: Option<String>,
        preflight_exempt: bool,
        policy: UnresolvedVersionPolicy,
    },
}

/// Per-request decision over candidate route matches.
///
/// Holds the version resolved for one request. Evaluating it has no side
/// effects beyond logging, so the same match always gets the same answer.
#[derive(Debug, Clone)]
pub struct VersionPredicate<'r> {
    request: &'r Request,
    decision: Decision,
}

impl VersionPredicate<'_> {
    /// The version resolved by the chain, without the default
    pub fn resolved_version(&self) -> Option<&str> {
        match &self.decision {
            Decision::PassThrough => None,
            Decision::Evaluate { resolved, .. } => resolved.as_deref(),
        }
    }

    /// The version versioned routes are compared against: the resolved
    /// version, or the default when nothing was resolved
    pub fn effective_version(&self) -> Option<&str> {
        match &self.decision {
            Decision::PassThrough => None,
            Decision::Evaluate {
                resolved, fallback, ..
            } => resolved.as_deref().or(fallback.as_deref()),
        }
    }

    /// Decide whether `route` is retained
    pub fn matches<M>(&self, route: &M) -> bool
    where
        M: VersionedMatch + ?Sized,
    {
        let Decision::Evaluate {
            resolved,
            fallback,
            preflight_exempt,
            policy,
        } = &self.decision
        else {
            return true;
        };

        match route.declared_version() {
            Some(route_version) => {
                if *preflight_exempt {
                    trace_debug!(uri = %self.request.uri(), route_version, "Retaining versioned route for CORS preflight request");
                    return true;
                }
                let version = resolved.as_deref().or(fallback.as_deref());
                trace_debug!(uri = %self.request.uri(), route_version, resolved_version = ?version, "Route specifies a version");
                matches_versioned(route_version, version, *policy)
            }
            None => {
                trace_debug!(uri = %self.request.uri(), resolved_version = ?resolved, "Route does not specify a version");
                matches_unversioned(resolved.as_deref())
            }
        }
    }

    /// Keep only the retained matches, preserving their order
    pub fn retain<M>(&self, mut candidates: Vec<M>) -> Vec<M>
    where
        M: VersionedMatch,
    {
        candidates.retain(|candidate| self.matches(candidate));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::{FixedVersionResolver, HeaderVersionResolver, ParameterVersionResolverConfig};
    use crate::RouteMatch;
    use http::Method;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(method: Method, headers: &[(&str, &str)]) -> Request {
        let mut builder = http::Request::builder().method(method).uri("/users");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        Request::from(builder.body(()).unwrap())
    }

    fn get(headers: &[(&str, &str)]) -> Request {
        request(Method::GET, headers)
    }

    fn header_filter() -> RouteVersionFilter {
        RouteVersionFilter::new(ResolverChain::new().with(HeaderVersionResolver::new(["X-API-Version"])))
    }

    fn unversioned() -> RouteMatch<()> {
        RouteMatch::new(())
    }

    fn versioned(version: &str) -> RouteMatch<()> {
        RouteMatch::new(()).with_version(version)
    }

    fn preflight(extra: &[(&str, &str)]) -> Request {
        let mut headers = vec![
            ("origin", "https://example.com"),
            ("access-control-request-method", "GET"),
        ];
        headers.extend_from_slice(extra);
        request(Method::OPTIONS, &headers)
    }

    #[test]
    fn test_unversioned_route_no_version_retained() {
        let req = get(&[]);
        assert!(header_filter().filter(&req).matches(&unversioned()));
    }

    #[test]
    fn test_unversioned_route_with_version_discarded() {
        let req = get(&[("X-API-Version", "2")]);
        assert!(!header_filter().filter(&req).matches(&unversioned()));
    }

    #[test]
    fn test_versioned_route_exact_match() {
        let filter = header_filter();

        let req = get(&[("X-API-Version", "1")]);
        assert!(filter.filter(&req).matches(&versioned("1")));

        let req = get(&[("X-API-Version", "2")]);
        assert!(!filter.filter(&req).matches(&versioned("1")));
    }

    #[test]
    fn test_comparison_is_exact_string_equality() {
        let req = get(&[("X-API-Version", "1.0")]);
        assert!(!header_filter().filter(&req).matches(&versioned("1")));
    }

    #[test]
    fn test_versioned_route_nothing_resolved_retained() {
        let req = get(&[]);
        assert!(header_filter().filter(&req).matches(&versioned("1")));
    }

    #[test]
    fn test_strict_policy_discards_unresolved() {
        let filter = header_filter().unresolved_policy(UnresolvedVersionPolicy::Strict);
        let req = get(&[]);
        assert!(!filter.filter(&req).matches(&versioned("1")));
        assert!(filter.filter(&req).matches(&unversioned()));
    }

    #[test]
    fn test_default_version_applies_to_versioned_routes() {
        let filter = header_filter().default_version(StaticDefaultVersion::new("2"));
        let req = get(&[]);
        let predicate = filter.filter(&req);

        assert_eq!(predicate.resolved_version(), None);
        assert_eq!(predicate.effective_version(), Some("2"));
        assert!(predicate.matches(&versioned("2")));
        assert!(!predicate.matches(&versioned("1")));
    }

    #[test]
    fn test_default_version_does_not_hide_unversioned_routes() {
        let filter = header_filter().default_version(StaticDefaultVersion::new("2"));
        let req = get(&[]);
        assert!(filter.filter(&req).matches(&unversioned()));
    }

    #[test]
    fn test_resolved_version_wins_over_default() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let filter = header_filter().default_version(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "1".to_string()
        });

        let req = get(&[("X-API-Version", "3")]);
        let predicate = filter.filter(&req);
        assert_eq!(predicate.effective_version(), Some("3"));
        assert!(predicate.matches(&versioned("3")));
        assert!(!predicate.matches(&versioned("1")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_chain_is_pass_through() {
        let filter = RouteVersionFilter::new(ResolverChain::new());
        assert!(filter.is_pass_through());

        let req = get(&[("X-API-Version", "2")]);
        let predicate = filter.filter(&req);
        assert!(predicate.matches(&unversioned()));
        assert!(predicate.matches(&versioned("1")));
    }

    #[test]
    fn test_disabled_config_is_pass_through() {
        let filter = header_filter().versioning_config(RoutesVersioningConfig::default());
        assert!(filter.is_pass_through());

        let req = get(&[("X-API-Version", "2")]);
        assert!(filter.filter(&req).matches(&versioned("1")));
        assert!(filter.filter(&req).matches(&unversioned()));
    }

    #[test]
    fn test_resolvers_run_once_per_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let filter = RouteVersionFilter::new(ResolverChain::new().with(move |_: &Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("1".to_string())
        }));

        let req = get(&[]);
        let predicate = filter.filter(&req);
        let candidates = vec![versioned("1"), versioned("2"), unversioned(), versioned("1")];
        let retained = predicate.retain(candidates);

        assert_eq!(retained.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_try_filter_rejects_absent_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let filter = RouteVersionFilter::new(ResolverChain::new().with(
            move |_: &Request| -> Option<String> {
                counter.fetch_add(1, Ordering::SeqCst);
                None
            },
        ));

        let err = filter.try_filter(None).unwrap_err();
        assert_eq!(err, VersionError::InvalidArgument("request"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let req = get(&[]);
        assert!(filter.try_filter(Some(&req)).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_preflight_retains_versioned_route() {
        let req = preflight(&[]);
        assert!(header_filter().filter(&req).matches(&versioned("1")));
    }

    #[test]
    fn test_preflight_retains_mismatched_version() {
        let filter = RouteVersionFilter::new(ResolverChain::new().with(FixedVersionResolver::new("2")));
        let req = preflight(&[]);
        assert!(filter.filter(&req).matches(&versioned("1")));
    }

    #[test]
    fn test_preflight_does_not_exempt_unversioned_route() {
        let filter = RouteVersionFilter::new(ResolverChain::new().with(FixedVersionResolver::new("2")));
        let req = preflight(&[]);
        assert!(!filter.filter(&req).matches(&unversioned()));
    }

    #[test]
    fn test_preflight_announcing_version_header_is_matched_normally() {
        let config = RoutesVersioningConfig::enabled()
            .header(HeaderVersionResolverConfig::with_names(["X-API-Version"]));
        let filter = RouteVersionFilter::from_config(&config);

        // The preflight itself carries no version, so the permissive rule applies
        let req = preflight(&[("access-control-request-headers", "content-type, x-api-version")]);
        let predicate = filter.filter(&req);
        assert!(predicate.matches(&versioned("1")));
        assert!(predicate.matches(&unversioned()));

        // With a version that does not match, the route is discarded
        let req = preflight(&[
            ("access-control-request-headers", "X-API-Version"),
            ("X-API-Version", "2"),
        ]);
        assert!(!filter.filter(&req).matches(&versioned("1")));
    }

    #[test]
    fn test_preflight_suppression_under_strict_policy() {
        let config = RoutesVersioningConfig::enabled()
            .header(HeaderVersionResolverConfig::with_names(["X-API-Version"]))
            .unresolved_policy(UnresolvedVersionPolicy::Strict);
        let filter = RouteVersionFilter::from_config(&config);

        let announcing = preflight(&[("access-control-request-headers", "X-API-Version")]);
        assert!(!filter.filter(&announcing).matches(&versioned("1")));

        let silent = preflight(&[("access-control-request-headers", "content-type")]);
        assert!(filter.filter(&silent).matches(&versioned("1")));
    }

    #[test]
    fn test_preflight_exemption_kept_without_enabled_config() {
        // Header settings alone do not suppress the exemption
        let filter = RouteVersionFilter::new(ResolverChain::new().with(FixedVersionResolver::new("2")))
            .header_config(HeaderVersionResolverConfig::with_names(["X-API-Version"]));

        let req = preflight(&[("access-control-request-headers", "X-API-Version")]);
        assert!(filter.filter(&req).matches(&versioned("1")));
    }

    #[test]
    fn test_preflight_exemption_kept_with_disabled_header_section() {
        let config = RoutesVersioningConfig::enabled()
            .header(HeaderVersionResolverConfig {
                enabled: false,
                ..HeaderVersionResolverConfig::with_names(["X-API-Version"])
            })
            .parameter(ParameterVersionResolverConfig::default());
        let filter = RouteVersionFilter::from_config(&config);
        assert!(filter.header.is_none());

        let req = Request::from(
            http::Request::builder()
                .method(Method::OPTIONS)
                .uri("/users?api-version=2")
                .header("origin", "https://example.com")
                .header("access-control-request-method", "GET")
                .header("access-control-request-headers", "X-API-Version")
                .body(())
                .unwrap(),
        );
        let predicate = filter.filter(&req);
        assert_eq!(predicate.resolved_version(), Some("2"));
        assert!(predicate.matches(&versioned("1")));
    }

    #[test]
    fn test_from_config_wires_default_version() {
        let config = RoutesVersioningConfig::enabled()
            .header(HeaderVersionResolverConfig::default())
            .default_version("1");
        let filter = RouteVersionFilter::from_config(&config);

        let req = get(&[]);
        let predicate = filter.filter(&req);
        assert!(predicate.matches(&versioned("1")));
        assert!(!predicate.matches(&versioned("2")));
    }

    #[test]
    fn test_from_config_without_resolvers_is_pass_through() {
        let filter = RouteVersionFilter::from_config(&RoutesVersioningConfig::enabled());
        assert!(filter.is_pass_through());
    }

    #[test]
    fn test_filter_is_shareable_across_threads() {
        let filter = Arc::new(header_filter());
        let handles: Vec<_> = ["1", "2"]
            .into_iter()
            .map(|version| {
                let filter = Arc::clone(&filter);
                std::thread::spawn(move || {
                    let req = get(&[("X-API-Version", version)]);
                    filter.filter(&req).matches(&versioned("1"))
                })
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false]);
    }
}
