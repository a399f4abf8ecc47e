//! Route records.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::method::Method;
use crate::middleware::MiddlewareRef;
use crate::path::PathPattern;
use crate::request::Request;

/// A boxed handler closure.
pub type Closure = Arc<dyn Fn(&Request) -> Value + Send + Sync>;

/// What a route does once it is matched.
#[derive(Clone)]
pub enum Handler {
    /// Called with the request, its path parameters already bound.
    Closure(Closure),
    /// A `Class@action` reference resolved through the controller registry.
    Controller { class: String, action: String },
    /// Sends the client elsewhere.
    Redirect { target: String, status: u16 },
}

impl Handler {
    /// Wraps a closure. Its return value becomes the response body.
    ///
    /// ```
    /// use oxide_route::Handler;
    ///
    /// let handler = Handler::closure(|req| format!("user {}", req.params.at(0).unwrap_or("?")));
    /// assert!(!handler.is_empty());
    /// ```
    pub fn closure<F, R>(f: F) -> Self
    where
        F: Fn(&Request) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::Closure(Arc::new(move |req: &Request| -> Value { f(req).into() }))
    }

    /// References an action on a controller class.
    pub fn controller(class: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Controller {
            class: class.into(),
            action: action.into(),
        }
    }

    /// A symbolic reference without a class name cannot be dispatched.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Controller { class, .. } => class.is_empty(),
            Self::Redirect { target, .. } => target.is_empty(),
            Self::Closure(_) => false,
        }
    }
}

/// Parses `Class@action`. A bare class name leaves the action empty.
impl From<&str> for Handler {
    fn from(reference: &str) -> Self {
        match reference.split_once('@') {
            Some((class, action)) => Self::controller(class, action),
            None => Self::controller(reference, ""),
        }
    }
}

impl From<String> for Handler {
    fn from(reference: String) -> Self {
        Self::from(reference.as_str())
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closure(_) => f.write_str("<closure>"),
            Self::Controller { class, action } if action.is_empty() => f.write_str(class),
            Self::Controller { class, action } => write!(f, "{class}@{action}"),
            Self::Redirect { target, status } => write!(f, "redirect {status} {target}"),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closure(_) => f.write_str("Closure(..)"),
            Self::Controller { class, action } => f
                .debug_struct("Controller")
                .field("class", class)
                .field("action", action)
                .finish(),
            Self::Redirect { target, status } => f
                .debug_struct("Redirect")
                .field("target", target)
                .field("status", status)
                .finish(),
        }
    }
}

/// A single registered route.
#[derive(Clone, Debug)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// Path pattern.
    pub pattern: PathPattern,
    /// What runs when the route matches.
    pub handler: Handler,
    /// Dot-namespaced name; empty when unnamed.
    pub name: String,
    /// Middleware consulted before the handler.
    pub middleware: Option<MiddlewareRef>,
}

impl Route {
    /// Creates an unnamed route without middleware.
    pub fn new(method: Method, pattern: PathPattern, handler: Handler) -> Self {
        Self {
            method,
            pattern,
            handler,
            name: String::new(),
            middleware: None,
        }
    }

    /// The route's path pattern.
    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    /// Middleware name, when the route references one by name.
    pub fn middleware_name(&self) -> Option<&str> {
        self.middleware.as_ref().and_then(MiddlewareRef::name)
    }

    /// Serializable snapshot for introspection.
    pub fn info(&self) -> RouteInfo {
        let (redirect, status) = match &self.handler {
            Handler::Redirect { target, status } => (Some(target.clone()), Some(*status)),
            _ => (None, None),
        };
        RouteInfo {
            method: self.method,
            path: self.path().to_string(),
            name: self.name.clone(),
            handler: self.handler.to_string(),
            middleware: self.middleware.as_ref().map(ToString::to_string),
            redirect,
            status,
        }
    }
}

/// Flat description of a route, as listed by [`Router::route_list`](crate::Router::route_list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: Method,
    pub path: String,
    pub name: String,
    pub handler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middleware: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}
