//! Request type handed to middleware and handlers.

use std::collections::HashMap;

/// Path parameters extracted from the URL, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    params: Vec<(String, String)>,
}

impl PathParams {
    /// Creates new empty path params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Gets a parameter value by placeholder name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Gets a parameter value by position.
    pub fn at(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(|(_, v)| v.as_str())
    }

    /// The bound values in order.
    pub fn values(&self) -> Vec<&str> {
        self.params.iter().map(|(_, v)| v.as_str()).collect()
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// An incoming request, reduced to what routing needs.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method as received. Unsupported verbs never match a route.
    pub method: String,
    /// Normalized request path.
    pub path: String,
    /// Path parameters bound by the matched route.
    pub params: PathParams,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Creates a new request for an already clean path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            params: PathParams::new(),
            headers: HashMap::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }

    /// Builds a request from a raw URL.
    ///
    /// The base URL is stripped, the query string is dropped, every segment
    /// loses the characters outside `[A-Za-z0-9._-]`, and empty segments are
    /// dropped. The result always starts with `/`.
    ///
    /// ```
    /// use oxide_route::Request;
    ///
    /// let req = Request::from_url("GET", "http://localhost/app/user/7/?tab=posts", "http://localhost/app/");
    /// assert_eq!(req.path, "/user/7");
    /// ```
    pub fn from_url(method: impl Into<String>, url: &str, base_url: &str) -> Self {
        let relative = if base_url.is_empty() {
            url
        } else {
            url.strip_prefix(base_url).unwrap_or(url)
        };

        let path_part = relative.split_once('?').map_or(relative, |(path, _)| path);

        let segments: Vec<String> = path_part
            .trim_matches('/')
            .split('/')
            .map(clean_segment)
            .filter(|s| !s.is_empty())
            .collect();

        Self::new(method, format!("/{}", segments.join("/")))
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Gets a header value.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        // Case-insensitive header lookup
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Keeps only `[A-Za-z0-9._-]` from a path segment.
fn clean_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
        .collect()
}
