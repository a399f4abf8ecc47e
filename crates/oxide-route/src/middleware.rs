//! Middleware: per-route hooks that may veto a request.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::error::DispatchError;
use crate::request::Request;
use crate::response::Response;

/// Trait for middleware that inspects a request before its handler runs.
///
/// Returning `false` rejects the request; the dispatcher then answers with
/// `400 Invalid request` and the handler is never called. The response may be
/// decorated (headers, status) either way.
///
/// # Example
///
/// ```
/// use oxide_route::{Middleware, Request, Response};
///
/// struct RequireJson;
///
/// impl Middleware for RequireJson {
///     fn process(&self, req: &Request, _res: &mut Response) -> bool {
///         req.get_header("Accept") == Some("application/json")
///     }
/// }
/// ```
pub trait Middleware: Send + Sync {
    /// Decides whether the request may reach its handler.
    fn process(&self, req: &Request, res: &mut Response) -> bool;
}

impl<F> Middleware for F
where
    F: Fn(&Request, &mut Response) -> bool + Send + Sync,
{
    fn process(&self, req: &Request, res: &mut Response) -> bool {
        self(req, res)
    }
}

/// How a route refers to its middleware.
#[derive(Clone)]
pub enum MiddlewareRef {
    /// Resolved through the router's [`MiddlewareRegistry`] at dispatch time.
    Named(String),
    /// A ready instance.
    Instance(Arc<dyn Middleware>),
}

impl MiddlewareRef {
    /// Wraps a middleware instance.
    pub fn instance(mw: impl Middleware + 'static) -> Self {
        Self::Instance(Arc::new(mw))
    }

    /// The registered name, for named references.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Instance(_) => None,
        }
    }
}

impl fmt::Debug for MiddlewareRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

impl fmt::Display for MiddlewareRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Instance(_) => f.write_str("<instance>"),
        }
    }
}

impl From<&str> for MiddlewareRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for MiddlewareRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Arc<dyn Middleware>> for MiddlewareRef {
    fn from(mw: Arc<dyn Middleware>) -> Self {
        Self::Instance(mw)
    }
}

/// Named middleware available to routes.
#[derive(Default, Clone)]
pub struct MiddlewareRegistry {
    entries: HashMap<String, Arc<dyn Middleware>>,
}

impl MiddlewareRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers middleware under a name, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, mw: impl Middleware + 'static) {
        self.entries.insert(name.into(), Arc::new(mw));
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolves a route's reference to an instance.
    pub fn resolve(&self, reference: &MiddlewareRef) -> Result<Arc<dyn Middleware>, DispatchError> {
        match reference {
            MiddlewareRef::Instance(mw) => Ok(Arc::clone(mw)),
            MiddlewareRef::Named(name) => self
                .entries
                .get(name)
                .cloned()
                .ok_or_else(|| DispatchError::MiddlewareNotFound(name.clone())),
        }
    }
}

/// Middleware that requires authentication.
///
/// A request passes when it carries an `Authorization` header or a
/// `session=` cookie, or when its path starts with an excluded prefix.
#[derive(Debug, Clone, Default)]
pub struct AuthMiddleware {
    /// Path prefixes that skip the check.
    pub exclude: Vec<String>,
}

impl AuthMiddleware {
    /// Creates new auth middleware.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds paths to exclude from authentication.
    #[must_use]
    pub fn exclude(mut self, paths: &[&str]) -> Self {
        self.exclude = paths.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Checks if a path should be excluded.
    fn is_excluded(&self, path: &str) -> bool {
        self.exclude.iter().any(|p| path.starts_with(p))
    }
}

impl Middleware for AuthMiddleware {
    fn process(&self, req: &Request, res: &mut Response) -> bool {
        if self.is_excluded(&req.path) {
            return true;
        }

        let authenticated = req.get_header("Authorization").is_some()
            || req
                .get_header("Cookie")
                .is_some_and(|c| c.contains("session="));
        if !authenticated {
            res.set_header("WWW-Authenticate", "Bearer");
        }
        authenticated
    }
}

/// Middleware that logs requests and always lets them through.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn process(&self, req: &Request, _res: &mut Response) -> bool {
        info!(method = %req.method, path = %req.path, params = ?req.params, "request");
        true
    }
}
