//! Route table holding several versions of the same route
//!
//! Path patterns use `{param}` syntax and are matched with a radix tree
//! (matchit). Unlike a plain router, one pattern and method may carry
//! several handlers as long as they declare different versions; the
//! [`RouteVersionFilter`] then narrows them per request.
//!
//! # Example
//!
//! ```rust
//! use http::Method;
//! use routever_core::{RouteTable, RouteVersionFilter, Request};
//! use routever_core::resolution::{HeaderVersionResolver, ResolverChain};
//!
//! let mut table = RouteTable::new();
//! table.insert_versioned(Method::GET, "/users/{id}", "1", "get_user_v1").unwrap();
//! table.insert_versioned(Method::GET, "/users/{id}", "2", "get_user_v2").unwrap();
//!
//! let filter = RouteVersionFilter::new(ResolverChain::new().with(HeaderVersionResolver::default()));
//! let request = Request::from(
//!     http::Request::builder()
//!         .uri("/users/42")
//!         .header("X-API-VERSION", "2")
//!         .body(())
//!         .unwrap(),
//! );
//!
//! let found = table.route(&request, &filter).unwrap();
//! assert_eq!(**found.handler(), "get_user_v2");
//! assert_eq!(found.param("id"), Some("42"));
//! ```

use crate::error::{Result, VersionError};
use crate::filter::RouteVersionFilter;
use crate::request::Request;
use crate::route::RouteMatch;
use http::Method;
use matchit::Router as MatchitRouter;
use std::collections::HashMap;

struct RouteEntry<H> {
    method: Method,
    version: Option<String>,
    handler: H,
}

struct PathSlot<H> {
    pattern: String,
    entries: Vec<RouteEntry<H>>,
}

/// Routes keyed by path pattern and method, each optionally versioned.
pub struct RouteTable<H> {
    paths: MatchitRouter<usize>,
    slots: Vec<PathSlot<H>>,
    index: HashMap<String, usize>,
}

impl<H> RouteTable<H> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            paths: MatchitRouter::new(),
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register an unversioned handler
    pub fn insert(&mut self, method: Method, pattern: &str, handler: H) -> Result<()> {
        self.register(method, pattern, None, handler)
    }

    /// Register a handler declaring `version`
    pub fn insert_versioned(
        &mut self,
        method: Method,
        pattern: &str,
        version: impl Into<String>,
        handler: H,
    ) -> Result<()> {
        self.register(method, pattern, Some(version.into()), handler)
    }

    fn register(
        &mut self,
        method: Method,
        pattern: &str,
        version: Option<String>,
        handler: H,
    ) -> Result<()> {
        let matchit_path = convert_path_params(pattern);

        let slot = match self.index.get(&matchit_path) {
            Some(&slot) => slot,
            None => {
                let slot = self.slots.len();
                self.paths
                    .insert(matchit_path.clone(), slot)
                    .map_err(|e| VersionError::route_conflict(pattern, e.to_string()))?;
                self.index.insert(matchit_path, slot);
                self.slots.push(PathSlot {
                    pattern: pattern.to_string(),
                    entries: Vec::new(),
                });
                slot
            }
        };

        let entries = &mut self.slots[slot].entries;
        if entries
            .iter()
            .any(|entry| entry.method == method && entry.version == version)
        {
            let details = match &version {
                Some(v) => format!("{} handler for version {} already registered", method, v),
                None => format!("unversioned {} handler already registered", method),
            };
            return Err(VersionError::route_conflict(pattern, details));
        }

        trace_trace!(%method, pattern, version = ?version, "Registered route");
        entries.push(RouteEntry {
            method,
            version,
            handler,
        });
        Ok(())
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.slots.iter().map(|slot| slot.entries.len()).sum()
    }

    /// Check if no handler is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered path patterns, in registration order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.pattern.as_str())
    }

    /// Every handler registered for the request's path and method, in
    /// registration order
    pub fn candidates(&self, request: &Request) -> Vec<RouteMatch<&H>> {
        let Ok(matched) = self.paths.at(request.path()) else {
            return Vec::new();
        };

        let params: HashMap<String, String> = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        self.slots[*matched.value]
            .entries
            .iter()
            .filter(|entry| &entry.method == request.method())
            .map(|entry| {
                let route = RouteMatch::new(&entry.handler).with_params(params.clone());
                match &entry.version {
                    Some(version) => route.with_version(version.clone()),
                    None => route,
                }
            })
            .collect()
    }

    /// Find the handler for `request`: the first candidate retained by
    /// `filter`
    pub fn route(&self, request: &Request, filter: &RouteVersionFilter) -> Option<RouteMatch<&H>> {
        let candidates = self.candidates(request);
        if candidates.is_empty() {
            return None;
        }
        filter.filter(request).retain(candidates).into_iter().next()
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert {param} style to :param for matchit
fn convert_path_params(path: &str) -> String {
    let mut result = String::with_capacity(path.len());

    for ch in path.chars() {
        match ch {
            '{' => result.push(':'),
            '}' => {}
            _ => result.push(ch),
        }
    }

    result
}
