//! Ordered route storage, matching and reverse lookup.

use std::collections::HashMap;
use std::ops::Range;

use tracing::{debug, trace, warn};

use crate::group::GroupSettings;
use crate::method::Method;
use crate::middleware::MiddlewareRef;
use crate::path::{self, MatchStrategy, PathPattern};
use crate::request::PathParams;
use crate::route::{Handler, Route};

/// One or more paths registered with the same handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathList(Vec<String>);

impl PathList {
    /// Iterates over the paths.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for PathList {
    fn from(path: &str) -> Self {
        Self(vec![path.to_string()])
    }
}

impl From<String> for PathList {
    fn from(path: String) -> Self {
        Self(vec![path])
    }
}

impl From<&[&str]> for PathList {
    fn from(paths: &[&str]) -> Self {
        Self(paths.iter().map(|p| (*p).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PathList {
    fn from(paths: [&str; N]) -> Self {
        Self(paths.iter().map(|p| (*p).to_string()).collect())
    }
}

impl From<Vec<&str>> for PathList {
    fn from(paths: Vec<&str>) -> Self {
        Self::from(paths.as_slice())
    }
}

impl From<Vec<String>> for PathList {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}

/// A matched route and the parameters bound from the path.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The first route that matched.
    pub route: &'a Route,
    /// Bound values, in placeholder order.
    pub params: PathParams,
}

/// Whether a URL carries its own scheme (`scheme://...`).
fn is_absolute(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, _)| {
        let mut chars = scheme.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Append-only route storage.
///
/// Registration order is significant: [`RouteTable::find`] returns the first
/// route whose method and pattern accept the request, with no specificity
/// scoring.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    group: Option<GroupSettings>,
    base_url: String,
    strategy: MatchStrategy,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new(base_url: impl Into<String>, strategy: MatchStrategy) -> Self {
        Self {
            routes: Vec::new(),
            group: None,
            base_url: base_url.into(),
            strategy,
        }
    }

    /// The base URL used for reverse lookup and redirects.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replaces the base URL.
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into();
    }

    /// The matcher used for parameterized routes.
    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// All routes, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The active group frame.
    pub fn group_settings(&self) -> Option<&GroupSettings> {
        self.group.as_ref()
    }

    /// Installs a group frame, returning the one it replaces.
    pub(crate) fn replace_group(&mut self, frame: Option<GroupSettings>) -> Option<GroupSettings> {
        std::mem::replace(&mut self.group, frame)
    }

    /// Routes in `range`, skipping indices past the end.
    pub(crate) fn routes_mut(&mut self, range: Range<usize>) -> impl Iterator<Item = &mut Route> {
        let end = range.end.min(self.routes.len());
        let start = range.start.min(end);
        self.routes[start..end].iter_mut()
    }

    /// Registers one route per path and returns the indices it created.
    ///
    /// Empty paths and empty symbolic handlers are skipped. Each path goes
    /// through optional-segment expansion, then picks up the active group's
    /// URL prefix, name prefix and middleware.
    pub fn register(
        &mut self,
        paths: impl Into<PathList>,
        handler: Handler,
        method: Method,
        name: &str,
    ) -> Range<usize> {
        let start = self.routes.len();

        if handler.is_empty() {
            warn!(%method, "skipping route without handler");
            return start..start;
        }

        for raw in paths.into().iter() {
            if raw.is_empty() {
                warn!(%method, "skipping route with empty path");
                continue;
            }

            for expanded in path::expand_optional(raw) {
                let full = match &self.group {
                    Some(group) => path::join(&group.url_prefix, &expanded),
                    None => expanded,
                };

                let pattern = match PathPattern::new(&full) {
                    Ok(pattern) => pattern,
                    Err(e) => {
                        warn!(%method, error = %e, "skipping route");
                        continue;
                    }
                };

                let mut route = Route::new(method, pattern, handler.clone());
                if let Some(group) = &self.group {
                    route.name = format!("{}{name}", group.name_prefix);
                    route.middleware = group.middleware.clone();
                } else {
                    route.name = name.to_string();
                }

                debug!(%method, path = route.path(), handler = %route.handler, "registered route");
                self.routes.push(route);
            }
        }

        start..self.routes.len()
    }

    /// Registers a GET route that redirects to `to`.
    ///
    /// The target is stored as given; see [`RouteTable::redirect_location`].
    pub fn register_redirect(&mut self, from: &str, to: &str, status: u16) -> Range<usize> {
        let target = to.to_string();
        self.register(from, Handler::Redirect { target, status }, Method::Get, "")
    }

    /// Resolves a redirect target against the current base URL.
    ///
    /// Targets carrying a scheme are returned unchanged.
    pub fn redirect_location(&self, target: &str) -> String {
        if is_absolute(target) {
            target.to_string()
        } else {
            self.absolute_url(target)
        }
    }

    /// Appends to the name of the most recent route. False when empty.
    pub fn name_last(&mut self, suffix: &str) -> bool {
        match self.routes.last_mut() {
            Some(route) => {
                route.name.push_str(suffix);
                true
            }
            None => false,
        }
    }

    /// Sets the middleware of the most recent route. False when empty.
    pub fn middleware_last(&mut self, middleware: impl Into<MiddlewareRef>) -> bool {
        match self.routes.last_mut() {
            Some(route) => {
                route.middleware = Some(middleware.into());
                true
            }
            None => false,
        }
    }

    /// Finds the first route accepting `method` and `path`.
    ///
    /// A literal pattern equal to the path wins immediately. Otherwise
    /// parameterized patterns are tried with the table's strategy.
    pub fn find(&self, method: Method, path: &str) -> Option<RouteMatch<'_>> {
        for route in self.routes.iter().filter(|r| r.method == method) {
            if route.path() == path {
                return Some(RouteMatch {
                    route,
                    params: PathParams::new(),
                });
            }

            if route.pattern.is_parameterized() {
                if let Some(params) = route.pattern.matches(path, self.strategy) {
                    return Some(RouteMatch { route, params });
                }
                trace!(pattern = route.path(), path, "pattern did not match");
            }
        }

        None
    }

    /// Builds the URL of the first route named `name`.
    ///
    /// `{key}` tokens are replaced from `substitutions`. An unknown name yields
    /// the base URL itself.
    pub fn url_for(&self, name: &str, substitutions: &HashMap<String, String>) -> String {
        let pattern = self
            .routes
            .iter()
            .find(|r| r.name == name)
            .map_or("", Route::path);

        self.absolute_url(&path::substitute(pattern, substitutions))
    }

    /// Prefixes a path with the base URL.
    fn absolute_url(&self, path: &str) -> String {
        let relative = path.trim_start_matches('/');
        if self.base_url.is_empty() {
            format!("/{relative}")
        } else {
            format!("{}/{relative}", self.base_url.trim_end_matches('/'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> Handler {
        Handler::closure(|_| "done")
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("http://habibhadi.com"));
        assert!(is_absolute("svn+ssh://host/repo"));
        assert!(!is_absolute("/redirected"));
        assert!(!is_absolute("redirected?next=http://x"));
    }

    #[test]
    fn test_register_normalizes_paths() {
        let mut table = RouteTable::default();
        table.register("test/", ok(), Method::Get, "");
        table.register("/", ok(), Method::Get, "");
        assert_eq!(table.routes()[0].path(), "/test");
        assert_eq!(table.routes()[1].path(), "/");
    }

    #[test]
    fn test_register_skips_empty() {
        let mut table = RouteTable::default();
        assert!(table.register("", ok(), Method::Get, "").is_empty());
        assert!(table.register("/x", Handler::from(""), Method::Get, "").is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_register_multiple_paths() {
        let mut table = RouteTable::default();
        let range = table.register(["about", "contact"], ok(), Method::Get, "page");
        assert_eq!(range, 0..2);
        assert_eq!(table.routes()[1].path(), "/contact");
        assert_eq!(table.routes()[1].name, "page");
    }

    #[test]
    fn test_register_optional_segment() {
        let mut table = RouteTable::default();
        table.register("name/{name?}", ok(), Method::Get, "");
        let paths: Vec<&str> = table.routes().iter().map(Route::path).collect();
        assert_eq!(paths, ["/name", "/name/{name}"]);
    }

    #[test]
    fn test_find_literal_and_pattern() {
        let mut table = RouteTable::default();
        table.register("test", ok(), Method::Get, "");
        table.register("user/{id}", ok(), Method::Get, "");

        let found = table.find(Method::Get, "/test").unwrap();
        assert_eq!(found.route.path(), "/test");
        assert!(found.params.is_empty());
        assert!(table.find(Method::Get, "/testx").is_none());
        assert!(table.find(Method::Post, "/test").is_none());

        let found = table.find(Method::Get, "/user/1").unwrap();
        assert_eq!(found.route.path(), "/user/{id}");
        assert_eq!(found.params.values(), vec!["1"]);
    }

    #[test]
    fn test_find_first_registered_wins() {
        let mut table = RouteTable::default();
        table.register("post/{slug}", ok(), Method::Get, "first");
        table.register("post/{id}", ok(), Method::Get, "second");
        table.register("post/latest", ok(), Method::Get, "literal");

        assert_eq!(table.find(Method::Get, "/post/latest").unwrap().route.name, "first");
    }

    #[test]
    fn test_find_with_pattern_strategy() {
        let mut table = RouteTable::new("", MatchStrategy::Pattern);
        table.register("files/{name}", ok(), Method::Get, "");
        assert!(table.find(Method::Get, "/files/report").is_some());
        assert!(table.find(Method::Get, "/files/report.pdf").is_none());
    }

    #[test]
    fn test_find_is_pure() {
        let mut table = RouteTable::default();
        table.register("user/{id}/edit", ok(), Method::Get, "");
        let first = table.find(Method::Get, "/user/5/edit").unwrap().params;
        let second = table.find(Method::Get, "/user/5/edit").unwrap().params;
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_name_and_middleware_last() {
        let mut table = RouteTable::default();
        assert!(!table.name_last("delete"));
        assert!(!table.middleware_last("DemoMiddleware"));

        table.register("/", ok(), Method::Delete, "");
        assert!(table.name_last("delete"));
        assert!(table.middleware_last("DemoMiddleware"));
        assert_eq!(table.routes()[0].name, "delete");
        assert_eq!(table.routes()[0].middleware_name(), Some("DemoMiddleware"));
    }

    #[test]
    fn test_redirect_resolution() {
        let mut table = RouteTable::new("http://x/", MatchStrategy::default());
        table.register_redirect("/old", "/new", 301);
        table.register_redirect("/away", "http://habibhadi.com", 302);

        let targets: Vec<String> = table.routes().iter().map(|r| r.info().redirect.unwrap()).collect();
        assert_eq!(targets, ["/new", "http://habibhadi.com"]);
        assert_eq!(table.routes()[0].method, Method::Get);

        assert_eq!(table.redirect_location("/new"), "http://x/new");
        assert_eq!(table.redirect_location("http://habibhadi.com"), "http://habibhadi.com");

        table.set_base_url("https://y/app");
        assert_eq!(table.redirect_location("/new"), "https://y/app/new");
    }

    #[test]
    fn test_url_for() {
        let mut table = RouteTable::new("http://x/", MatchStrategy::default());
        table.register("/", ok(), Method::Delete, "delete");
        table.register("user/{id}/post/{post}", ok(), Method::Get, "user.post");

        assert_eq!(table.url_for("delete", &HashMap::new()), "http://x/");

        let subs: HashMap<String, String> = [
            ("post".to_string(), "9".to_string()),
            ("id".to_string(), "1".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.url_for("user.post", &subs), "http://x/user/1/post/9");
        assert_eq!(table.url_for("unknown", &subs), "http://x/");
    }
}
