//! Main router: registration API in front of a route table and a dispatcher.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut, Range};
use std::sync::Arc;

use crate::config::RouterSettings;
use crate::controller::{ControllerClass, HandlerFactory};
use crate::dispatcher::Dispatcher;
use crate::group::{GroupScope, GroupSettings};
use crate::method::Method;
use crate::middleware::{Middleware, MiddlewareRef};
use crate::path;
use crate::request::Request;
use crate::response::Response;
use crate::route::{Handler, Route, RouteInfo};
use crate::table::{PathList, RouteMatch, RouteTable};
use crate::views::{ErrorPages, ViewDir};

/// Redirect status used by [`Router::redirect`].
pub const DEFAULT_REDIRECT_STATUS: u16 = 301;

/// Verbs generated by [`Router::crud`]: methods, path suffix, action.
const CRUD_LAYOUT: [(&[Method], &str, &str); 7] = [
    (&[Method::Get], "", "index"),
    (&[Method::Get], "/create", "create"),
    (&[Method::Get], "/{param}", "show"),
    (&[Method::Get], "/{param}/edit", "edit"),
    (&[Method::Post], "", "store"),
    (&[Method::Put, Method::Patch], "/{param}", "update"),
    (&[Method::Delete], "/{param}", "destroy"),
];

/// The router.
///
/// Routes are registered through `&mut Router`; dispatching only needs
/// `&Router`, so a fully registered router can be shared behind an `Arc`.
pub struct Router {
    pub(crate) table: RouteTable,
    dispatcher: Dispatcher,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a router with default settings.
    pub fn new() -> Self {
        Self::with_settings(RouterSettings::default())
    }

    /// Creates a router from settings.
    pub fn with_settings(settings: RouterSettings) -> Self {
        let mut dispatcher = Dispatcher::new(settings.use_di);
        if let Some(dir) = settings.view_dir {
            dispatcher.set_error_pages(Arc::new(ViewDir::new(dir)));
        }

        Self {
            table: RouteTable::new(settings.base_url, settings.strategy),
            dispatcher,
        }
    }

    /// Sets the base URL. Relative redirect targets follow it, including
    /// those registered earlier.
    pub fn set_base_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.table.set_base_url(url);
        self
    }

    /// The base URL.
    pub fn base_url(&self) -> &str {
        self.table.base_url()
    }

    /// Chooses factory construction (`true`) or default construction of controllers.
    pub fn set_use_di(&mut self, enabled: bool) -> &mut Self {
        self.dispatcher.set_use_di(enabled);
        self
    }

    /// Declares a controller class.
    pub fn controller(&mut self, class: ControllerClass) -> &mut Self {
        self.dispatcher.controllers_mut().register(class);
        self
    }

    /// Registers middleware that routes can reference by name.
    pub fn register_middleware(
        &mut self,
        name: impl Into<String>,
        middleware: impl Middleware + 'static,
    ) -> &mut Self {
        self.dispatcher.middleware_mut().register(name, middleware);
        self
    }

    /// Installs the factory that builds controllers.
    pub fn handler_factory(&mut self, factory: impl HandlerFactory + 'static) -> &mut Self {
        self.dispatcher.set_factory(Arc::new(factory));
        self
    }

    /// Installs an error page renderer, replacing the view directory.
    pub fn error_pages(&mut self, pages: impl ErrorPages + 'static) -> &mut Self {
        self.dispatcher.set_error_pages(Arc::new(pages));
        self
    }

    fn handle(&mut self, range: Range<usize>) -> RouteHandle<'_> {
        RouteHandle {
            router: self,
            range,
        }
    }

    /// Adds a route for one method.
    pub fn route(
        &mut self,
        method: Method,
        paths: impl Into<PathList>,
        handler: impl Into<Handler>,
    ) -> RouteHandle<'_> {
        let range = self.table.register(paths, handler.into(), method, "");
        self.handle(range)
    }

    /// Adds a GET route.
    pub fn get(&mut self, paths: impl Into<PathList>, handler: impl Into<Handler>) -> RouteHandle<'_> {
        self.route(Method::Get, paths, handler)
    }

    /// Adds a POST route.
    pub fn post(&mut self, paths: impl Into<PathList>, handler: impl Into<Handler>) -> RouteHandle<'_> {
        self.route(Method::Post, paths, handler)
    }

    /// Adds a PUT route.
    pub fn put(&mut self, paths: impl Into<PathList>, handler: impl Into<Handler>) -> RouteHandle<'_> {
        self.route(Method::Put, paths, handler)
    }

    /// Adds a PATCH route.
    pub fn patch(&mut self, paths: impl Into<PathList>, handler: impl Into<Handler>) -> RouteHandle<'_> {
        self.route(Method::Patch, paths, handler)
    }

    /// Adds a DELETE route.
    pub fn delete(&mut self, paths: impl Into<PathList>, handler: impl Into<Handler>) -> RouteHandle<'_> {
        self.route(Method::Delete, paths, handler)
    }

    /// Adds an OPTIONS route.
    pub fn options(&mut self, paths: impl Into<PathList>, handler: impl Into<Handler>) -> RouteHandle<'_> {
        self.route(Method::Options, paths, handler)
    }

    /// Adds the same route for each of `methods`.
    pub fn match_methods(
        &mut self,
        methods: &[Method],
        paths: impl Into<PathList>,
        handler: impl Into<Handler>,
    ) -> RouteHandle<'_> {
        let paths = paths.into();
        let handler = handler.into();
        let start = self.table.len();
        for &method in methods {
            self.table.register(paths.clone(), handler.clone(), method, "");
        }
        let end = self.table.len();
        self.handle(start..end)
    }

    /// Adds the same route for every method.
    pub fn any(&mut self, paths: impl Into<PathList>, handler: impl Into<Handler>) -> RouteHandle<'_> {
        self.match_methods(&Method::ALL, paths, handler)
    }

    /// Adds the seven resource routes for `base`.
    ///
    /// Routes are named `<base>.<action>`, or just `<action>` when the base is
    /// the root path. A controller handler is rewritten to `Class@<action>`
    /// per route; a closure handler serves all of them.
    ///
    /// ```
    /// use oxide_route::Router;
    ///
    /// let mut router = Router::new();
    /// router.crud("/posts", "PostController");
    ///
    /// let routes = router.route_list();
    /// assert_eq!(routes.len(), 8);
    /// assert_eq!(routes[2].path, "/posts/{param}");
    /// assert_eq!(routes[2].name, "posts.show");
    /// assert_eq!(routes[2].handler, "PostController@show");
    /// ```
    pub fn crud(&mut self, base: &str, handler: impl Into<Handler>) -> RouteHandle<'_> {
        let handler = handler.into();
        let name_base = base.trim_matches('/');
        let start = self.table.len();

        for (methods, suffix, action) in CRUD_LAYOUT {
            let action_handler = match &handler {
                Handler::Controller { class, .. } => Handler::controller(class.as_str(), action),
                other => other.clone(),
            };
            let name = if name_base.is_empty() {
                action.to_string()
            } else {
                format!("{name_base}.{action}")
            };
            for &method in methods {
                self.table.register(
                    path::join(base, suffix),
                    action_handler.clone(),
                    method,
                    &name,
                );
            }
        }

        let end = self.table.len();
        self.handle(start..end)
    }

    /// Adds a permanent (301) redirect.
    pub fn redirect(&mut self, from: &str, to: &str) -> RouteHandle<'_> {
        self.redirect_with_status(from, to, DEFAULT_REDIRECT_STATUS)
    }

    /// Adds a redirect with an explicit status.
    pub fn redirect_with_status(&mut self, from: &str, to: &str, status: u16) -> RouteHandle<'_> {
        let range = self.table.register_redirect(from, to, status);
        self.handle(range)
    }

    /// Registers routes under shared settings.
    ///
    /// The settings apply to every route registered inside `callback` and are
    /// lifted when it returns or panics. Nested groups combine with the
    /// enclosing one (see [`GroupSettings::nest`]).
    ///
    /// ```
    /// use oxide_route::{GroupSettings, Handler, Router};
    ///
    /// let mut router = Router::new();
    /// router.group(
    ///     GroupSettings::new().url_prefix("user/{userId}").name_prefix("user."),
    ///     |r| {
    ///         r.get("profile", Handler::closure(|req| format!("user {}", req.params.at(0).unwrap_or("")))).name("profile");
    ///     },
    /// );
    ///
    /// assert!(router.group_settings().is_none());
    /// assert_eq!(router.routes()[0].path(), "/user/{userId}/profile");
    /// assert_eq!(router.routes()[0].name, "user.profile");
    /// ```
    pub fn group<F>(&mut self, settings: GroupSettings, callback: F) -> &mut Self
    where
        F: FnOnce(&mut Router),
    {
        {
            let mut scope = GroupScope::enter(self, settings);
            callback(&mut *scope);
        }
        self
    }

    /// The active group settings, if a group callback is running.
    pub fn group_settings(&self) -> Option<&GroupSettings> {
        self.table.group_settings()
    }

    /// Appends to the most recent route's name. False when no route exists.
    pub fn name_last(&mut self, suffix: &str) -> bool {
        self.table.name_last(suffix)
    }

    /// Sets the most recent route's middleware. False when no route exists.
    pub fn middleware_last(&mut self, middleware: impl Into<MiddlewareRef>) -> bool {
        self.table.middleware_last(middleware)
    }

    /// Registered routes, in order.
    pub fn routes(&self) -> &[Route] {
        self.table.routes()
    }

    /// Serializable snapshot of all routes, in order.
    pub fn route_list(&self) -> Vec<RouteInfo> {
        self.table.routes().iter().map(Route::info).collect()
    }

    /// The underlying route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Generates the URL of a named route.
    pub fn url_for(&self, name: &str, substitutions: &HashMap<String, String>) -> String {
        self.table.url_for(name, substitutions)
    }

    /// Finds the route for a method and a clean path.
    pub fn find(&self, method: Method, path: &str) -> Option<RouteMatch<'_>> {
        self.table.find(method, path)
    }

    /// Dispatches a request whose path is already normalized.
    pub fn dispatch(&self, request: Request) -> Response {
        self.dispatcher.dispatch(&self.table, request)
    }

    /// Normalizes a raw URL against the base URL and dispatches it.
    pub fn run(&self, method: &str, url: &str) -> Response {
        self.dispatch(Request::from_url(method, url, self.table.base_url()))
    }
}

/// The routes created by one registration call.
///
/// Lets `name` and `middleware` target exactly those routes. The handle
/// dereferences to the router, so registration can keep chaining.
pub struct RouteHandle<'a> {
    router: &'a mut Router,
    range: Range<usize>,
}

impl RouteHandle<'_> {
    /// Appends to the names of the routes (after any group name prefix).
    pub fn name(mut self, suffix: &str) -> Self {
        for route in self.routes_mut() {
            route.name.push_str(suffix);
        }
        self
    }

    /// Sets the middleware of the routes.
    pub fn middleware(mut self, middleware: impl Into<MiddlewareRef>) -> Self {
        let middleware = middleware.into();
        for route in self.routes_mut() {
            route.middleware = Some(middleware.clone());
        }
        self
    }

    fn routes_mut(&mut self) -> impl Iterator<Item = &mut Route> + '_ {
        self.router.table.routes_mut(self.range.clone())
    }

    /// Indices of the routes in registration order.
    pub fn indices(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Whether the call registered nothing.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

impl Deref for RouteHandle<'_> {
    type Target = Router;

    fn deref(&self) -> &Router {
        &*self.router
    }
}

impl DerefMut for RouteHandle<'_> {
    fn deref_mut(&mut self) -> &mut Router {
        &mut *self.router
    }
}
