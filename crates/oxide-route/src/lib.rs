//! # oxide-route
//!
//! Request routing and dispatch.
//!
//! This crate provides:
//! - Route registration per HTTP method, for several methods, or for all six
//! - Path placeholders (`{id}`) and a single optional segment (`{name?}`)
//! - Route groups with URL prefixes, name prefixes and middleware
//! - Resource (CRUD) route generation and redirects
//! - Named routes for reverse URL lookup
//! - Controller dispatch through a handler factory
//!
//! ## Quick Start
//!
//! ```
//! use oxide_route::{Handler, Request, Router};
//!
//! let mut router = Router::new();
//! router.get("/", Handler::closure(|_| "Hello, World!"));
//! router
//!     .get("user/{id}", Handler::closure(|req| serde_json::json!({ "id": req.params.at(0) })))
//!     .name("user.show");
//!
//! let response = router.dispatch(Request::get("/user/123"));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body_string().as_deref(), Some(r#"{"id":"123"}"#));
//! ```
//!
//! ## Matching
//!
//! Routes are tried in registration order and the first one whose method and
//! pattern accept the request wins. A literal route equal to the path matches
//! at once; parameterized routes go through the configured
//! [`MatchStrategy`]. Bound values are positional: the first placeholder binds
//! the first value.
//!
//! ## Groups
//!
//! ```
//! use oxide_route::{AuthMiddleware, GroupSettings, Handler, Request, Router};
//!
//! let mut router = Router::new();
//! router.register_middleware("auth", AuthMiddleware::new());
//! router.group(GroupSettings::new().url_prefix("admin").middleware("auth"), |r| {
//!     r.get("dashboard", Handler::closure(|_| "welcome"));
//! });
//!
//! assert_eq!(router.dispatch(Request::get("/admin/dashboard")).status, 400);
//! let authorized = Request::get("/admin/dashboard").header("Authorization", "Bearer t");
//! assert_eq!(router.dispatch(authorized).status, 200);
//! ```
//!
//! ## Named Routes
//!
//! ```
//! use std::collections::HashMap;
//! use oxide_route::{Handler, Router, RouterSettings};
//!
//! let mut router = Router::with_settings(RouterSettings::new().base_url("http://localhost/"));
//! router.get("user/{id}", Handler::closure(|_| "")).name("user.show");
//!
//! let subs = HashMap::from([("id".to_string(), "9".to_string())]);
//! assert_eq!(router.url_for("user.show", &subs), "http://localhost/user/9");
//! ```

mod config;
mod controller;
mod dispatcher;
mod error;
mod group;
mod method;
mod middleware;
pub mod path;
mod request;
mod response;
mod route;
mod router;
mod table;
mod views;

pub use config::RouterSettings;
pub use controller::{Constructor, Controller, ControllerClass, ControllerRegistry, HandlerFactory};
pub use dispatcher::Dispatcher;
pub use error::{ConstructionError, DispatchError, Result, RouterError};
pub use group::GroupSettings;
pub use method::Method;
pub use middleware::{AuthMiddleware, LoggingMiddleware, Middleware, MiddlewareRef, MiddlewareRegistry};
pub use path::{MatchStrategy, PathPattern};
pub use request::{PathParams, Request};
pub use response::Response;
pub use route::{Closure, Handler, Route, RouteInfo};
pub use router::{RouteHandle, Router, DEFAULT_REDIRECT_STATUS};
pub use table::{PathList, RouteMatch, RouteTable};
pub use views::{ErrorPages, ViewDir};
