//! Error types for routing and dispatch.

use thiserror::Error;

/// Registration and configuration errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Invalid path pattern.
    #[error("invalid path pattern: {0}")]
    InvalidPattern(String),

    /// Method outside GET, POST, PUT, PATCH, DELETE and OPTIONS.
    #[error("unsupported method: {0}")]
    UnknownMethod(String),

    /// Settings could not be parsed.
    #[error("invalid router settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Failure reported by a handler factory or a default constructor.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConstructionError(pub String);

impl From<&str> for ConstructionError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for ConstructionError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Errors resolved into a response during a single dispatch.
///
/// None of these escape [`Router::dispatch`](crate::Router::dispatch); each
/// variant knows the status it is reported with, and its `Display` output is
/// the response message.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No route matched the method and path.
    #[error("Route doesn't exist")]
    RouteNotFound { method: String, path: String },

    /// A `Class@method` reference names a method the class does not have.
    #[error("{method} method doesn't exist in {class}")]
    HandlerNotFound { class: String, method: String },

    /// The route middleware vetoed the request.
    #[error("Invalid request")]
    MiddlewareRejected,

    /// A named middleware reference did not resolve.
    #[error("Middleware {0} is not registered")]
    MiddlewareNotFound(String),

    /// The controller instance could not be built.
    #[error(transparent)]
    HandlerConstruction(#[from] ConstructionError),
}

impl DispatchError {
    /// HTTP status the error is reported with.
    pub fn status(&self) -> u16 {
        match self {
            Self::RouteNotFound { .. } | Self::HandlerNotFound { .. } => 404,
            Self::MiddlewareRejected => 400,
            Self::MiddlewareNotFound(_) | Self::HandlerConstruction(_) => 500,
        }
    }
}
