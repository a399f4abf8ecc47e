//! Route groups: settings shared by every route registered in a callback.

use std::ops::{Deref, DerefMut};

use crate::middleware::MiddlewareRef;
use crate::router::Router;

/// Settings a group applies to its routes.
#[derive(Debug, Clone, Default)]
pub struct GroupSettings {
    /// Middleware attached to routes that have none of their own.
    pub middleware: Option<MiddlewareRef>,
    /// Path prefix, e.g. `user/{userId}`.
    pub url_prefix: String,
    /// Name prefix, e.g. `user.`.
    pub name_prefix: String,
}

impl GroupSettings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL prefix.
    #[must_use]
    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Sets the name prefix.
    #[must_use]
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Sets the middleware.
    #[must_use]
    pub fn middleware(mut self, middleware: impl Into<MiddlewareRef>) -> Self {
        self.middleware = Some(middleware.into());
        self
    }

    /// Combines an enclosing frame with a nested one.
    ///
    /// Prefixes concatenate; the inner middleware replaces the outer one.
    pub fn nest(&self, inner: &Self) -> Self {
        let url_prefix = match (
            self.url_prefix.trim_matches('/'),
            inner.url_prefix.trim_matches('/'),
        ) {
            ("", inner) => inner.to_string(),
            (outer, "") => outer.to_string(),
            (outer, inner) => format!("{outer}/{inner}"),
        };

        Self {
            middleware: inner.middleware.clone().or_else(|| self.middleware.clone()),
            url_prefix,
            name_prefix: format!("{}{}", self.name_prefix, inner.name_prefix),
        }
    }
}

/// Keeps a group frame active for as long as it lives.
///
/// Dropping the scope, including during a panic, restores the frame that was
/// active before it.
pub(crate) struct GroupScope<'a> {
    router: &'a mut Router,
    previous: Option<GroupSettings>,
}

impl<'a> GroupScope<'a> {
    pub(crate) fn enter(router: &'a mut Router, settings: GroupSettings) -> Self {
        let frame = match router.group_settings() {
            Some(outer) => outer.nest(&settings),
            None => settings,
        };
        let previous = router.table.replace_group(Some(frame));
        Self { router, previous }
    }
}

impl Deref for GroupScope<'_> {
    type Target = Router;

    fn deref(&self) -> &Router {
        &*self.router
    }
}

impl DerefMut for GroupScope<'_> {
    fn deref_mut(&mut self) -> &mut Router {
        &mut *self.router
    }
}

impl Drop for GroupScope<'_> {
    fn drop(&mut self) {
        self.router.table.replace_group(self.previous.take());
    }
}
