//! Read-only request view used during version filtering

use http::{header, request::Parts, HeaderMap, Method, Uri};

/// Read-only view of an incoming HTTP request.
///
/// Only the request head is kept; version filtering never looks at the body.
/// Header lookups are case-insensitive and multi-valued.
pub struct Request {
    parts: Parts,
}

impl Request {
    /// Create a request view from request parts
    pub fn from_parts(parts: Parts) -> Self {
        Self { parts }
    }

    /// Get the HTTP method
    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    /// Get the URI
    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Get the headers
    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Get the query string
    pub fn query_string(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    /// Iterate over every value of a header.
    ///
    /// Values that are not visible ASCII are skipped.
    pub fn header_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.parts
            .headers
            .get_all(name)
            .into_iter()
            .filter_map(|value| value.to_str().ok())
    }

    /// Get the first value of a header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).next()
    }

    /// Check whether a header is present, whatever its value
    pub fn contains_header(&self, name: &str) -> bool {
        self.parts.headers.contains_key(name)
    }

    /// Get the `Origin` header
    pub fn origin(&self) -> Option<&str> {
        self.parts
            .headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
    }

    /// Header names listed in `Access-Control-Request-Headers`.
    ///
    /// Every occurrence of the header is read and each comma-separated entry
    /// is trimmed. Empty entries are dropped.
    pub fn access_control_request_headers(&self) -> impl Iterator<Item = &str> + '_ {
        self.header_values("access-control-request-headers")
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Check whether this is a CORS preflight request.
    ///
    /// A preflight is an `OPTIONS` request carrying both an `Origin` and an
    /// `Access-Control-Request-Method` header.
    pub fn is_preflight(&self) -> bool {
        self.parts.method == Method::OPTIONS
            && self.origin().is_some()
            && self
                .parts
                .headers
                .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
    }
}

impl<B> From<http::Request<B>> for Request {
    fn from(request: http::Request<B>) -> Self {
        let (parts, _body) = request.into_parts();
        Self::from_parts(parts)
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.parts.method)
            .field("uri", &self.parts.uri)
            .finish()
    }
}
