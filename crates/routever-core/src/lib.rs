//! # routever core
//!
//! Version negotiation for HTTP routing. Given the route matches a router
//! already selected by path and method, routever keeps the ones whose
//! declared API version fits the version the request asks for.
//!
//! This crate is not meant to be used directly. Use `routever` instead.
//!
//! - [`resolution`]: resolvers that read the requested version from a
//!   request, combined into an ordered [`ResolverChain`](resolution::ResolverChain)
//! - [`DefaultVersionProvider`]: fallback when no resolver finds a version
//! - [`RouteVersionFilter`]: builds a per-request [`VersionPredicate`]
//! - [`RouteTable`]: registration-time table of versioned handlers

#![warn(missing_docs)]

#[macro_use]
mod tracing_macros;

mod config;
mod default_version;
mod error;
mod filter;
mod request;
pub mod resolution;
mod route;
mod table;

// Public API
pub use config::{RoutesVersioningConfig, UnresolvedVersionPolicy};
pub use default_version::{DefaultVersionProvider, StaticDefaultVersion};
pub use error::{Result, VersionError};
pub use filter::{matches_unversioned, matches_versioned, RouteVersionFilter, VersionPredicate};
pub use request::Request;
pub use resolution::{RequestVersionResolver, ResolverChain};
pub use route::{RouteMatch, VersionedMatch};
pub use table::RouteTable;
