//! One request, one dispatch cycle.
//!
//! The dispatcher turns a request into a response in three possible ways:
//! the handler ran, an error page was produced, or the client was redirected.
//! Errors never escape a cycle; each [`DispatchError`] becomes a response with
//! its own status.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::controller::{ControllerRegistry, HandlerFactory};
use crate::error::DispatchError;
use crate::method::Method;
use crate::middleware::MiddlewareRegistry;
use crate::request::Request;
use crate::response::Response;
use crate::route::Handler;
use crate::table::RouteTable;
use crate::views::ErrorPages;

/// Collaborators used to run matched routes.
#[derive(Default, Clone)]
pub struct Dispatcher {
    controllers: ControllerRegistry,
    middleware: MiddlewareRegistry,
    factory: Option<Arc<dyn HandlerFactory>>,
    error_pages: Option<Arc<dyn ErrorPages>>,
    use_di: bool,
}

impl Dispatcher {
    /// Creates a dispatcher without collaborators.
    pub fn new(use_di: bool) -> Self {
        Self {
            use_di,
            ..Self::default()
        }
    }

    /// Controller classes known to the dispatcher.
    pub fn controllers_mut(&mut self) -> &mut ControllerRegistry {
        &mut self.controllers
    }

    /// Named middleware known to the dispatcher.
    pub fn middleware_mut(&mut self) -> &mut MiddlewareRegistry {
        &mut self.middleware
    }

    /// Installs the factory used to build controllers.
    pub fn set_factory(&mut self, factory: Arc<dyn HandlerFactory>) {
        self.factory = Some(factory);
    }

    /// Installs the error page renderer.
    pub fn set_error_pages(&mut self, pages: Arc<dyn ErrorPages>) {
        self.error_pages = Some(pages);
    }

    /// Chooses factory construction (`true`) or default construction.
    pub fn set_use_di(&mut self, enabled: bool) {
        self.use_di = enabled;
    }

    /// Runs one dispatch cycle against `table`.
    pub fn dispatch(&self, table: &RouteTable, mut request: Request) -> Response {
        let mut response = Response::ok();

        if let Err(err) = self.execute(table, &mut request, &mut response) {
            let status = err.status();
            let message = err.to_string();
            info!(method = %request.method, path = %request.path, status, error = %message, "dispatch failed");

            let body = self
                .error_pages
                .as_ref()
                .and_then(|pages| pages.render(status, &message))
                .unwrap_or(message);
            response.error(status, body);
        }

        response
    }

    fn execute(
        &self,
        table: &RouteTable,
        request: &mut Request,
        response: &mut Response,
    ) -> Result<(), DispatchError> {
        let matched = request
            .method
            .parse::<Method>()
            .ok()
            .and_then(|method| table.find(method, &request.path))
            .ok_or_else(|| DispatchError::RouteNotFound {
                method: request.method.clone(),
                path: request.path.clone(),
            })?;

        let route = matched.route;
        request.params = matched.params;
        debug!(method = %route.method, route = route.path(), params = ?request.params, "route matched");

        if let Some(reference) = &route.middleware {
            let middleware = self.middleware.resolve(reference)?;
            if !middleware.process(request, response) {
                return Err(DispatchError::MiddlewareRejected);
            }
        }

        let content = match &route.handler {
            Handler::Redirect { target, status } => {
                let location = table.redirect_location(target);
                debug!(location = %location, status, "redirecting");
                response.set_status(*status);
                response.redirect(location);
                return Ok(());
            }
            Handler::Closure(closure) => closure(request),
            Handler::Controller { class, action } => self.call_controller(class, action, request)?,
        };

        response.write_body(&content);
        Ok(())
    }

    fn call_controller(
        &self,
        class: &str,
        action: &str,
        request: &Request,
    ) -> Result<Value, DispatchError> {
        let declared = self
            .controllers
            .get(class)
            .filter(|c| c.has_action(action))
            .ok_or_else(|| DispatchError::HandlerNotFound {
                class: class.to_string(),
                method: action.to_string(),
            })?;

        let instance = match &self.factory {
            Some(factory) if self.use_di => factory.construct(class)?,
            _ => declared.construct()?,
        };

        Ok(instance.call(action, request))
    }
}
