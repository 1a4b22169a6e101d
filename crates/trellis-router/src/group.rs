//! Route groups: a shared path prefix and shared middleware.

use crate::handlers::HandlerChain;
use crate::method::Method;
use crate::path::join_paths;

#[derive(Debug, Clone)]
enum Entry<H> {
    Route {
        method: Method,
        path: String,
        handlers: HandlerChain<H>,
    },
    Group(RouteGroup<H>),
}

/// A group of routes with a common prefix and middleware.
///
/// Groups only collect routes; nothing is validated until the group is
/// handed to [`crate::Router::mount`].
///
/// ```
/// use trellis_router::{RouteGroup, Router};
///
/// let api = RouteGroup::new("/api")
///     .middleware("auth")
///     .get("/users", "list_users")
///     .group(RouteGroup::new("/admin").post("/reload", "reload"));
///
/// let mut router = Router::new();
/// router.mount(api).unwrap();
/// assert_eq!(router.routes().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RouteGroup<H> {
    /// Path prefix, relative to the enclosing group.
    prefix: String,
    /// Middleware run before every route of the group, nested groups
    /// included.
    middleware: Vec<H>,
    /// Routes and nested groups, in declaration order.
    entries: Vec<Entry<H>>,
}

impl<H> RouteGroup<H> {
    /// Creates an empty group with the given prefix.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            middleware: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Returns the group prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Adds middleware to this group.
    #[must_use]
    pub fn middleware(mut self, handler: H) -> Self {
        self.middleware.push(handler);
        self
    }

    /// Adds a route with an arbitrary method and handler chain.
    #[must_use]
    pub fn handle(
        mut self,
        method: Method,
        path: &str,
        handlers: impl Into<HandlerChain<H>>,
    ) -> Self {
        self.entries.push(Entry::Route {
            method,
            path: path.to_string(),
            handlers: handlers.into(),
        });
        self
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get(self, path: &str, handler: H) -> Self {
        self.handle(Method::Get, path, HandlerChain::single(handler))
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post(self, path: &str, handler: H) -> Self {
        self.handle(Method::Post, path, HandlerChain::single(handler))
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put(self, path: &str, handler: H) -> Self {
        self.handle(Method::Put, path, HandlerChain::single(handler))
    }

    /// Adds a PATCH route.
    #[must_use]
    pub fn patch(self, path: &str, handler: H) -> Self {
        self.handle(Method::Patch, path, HandlerChain::single(handler))
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete(self, path: &str, handler: H) -> Self {
        self.handle(Method::Delete, path, HandlerChain::single(handler))
    }

    /// Adds a HEAD route.
    #[must_use]
    pub fn head(self, path: &str, handler: H) -> Self {
        self.handle(Method::Head, path, HandlerChain::single(handler))
    }

    /// Adds an OPTIONS route.
    #[must_use]
    pub fn options(self, path: &str, handler: H) -> Self {
        self.handle(Method::Options, path, HandlerChain::single(handler))
    }

    /// Nests another group below this one.
    #[must_use]
    pub fn group(mut self, group: Self) -> Self {
        self.entries.push(Entry::Group(group));
        self
    }
}

impl<H: Clone> RouteGroup<H> {
    /// Adds the same handler chain for every standard method.
    #[must_use]
    pub fn any(self, path: &str, handlers: impl Into<HandlerChain<H>>) -> Self {
        let handlers = handlers.into();
        Method::STANDARD.into_iter().fold(self, |group, method| {
            group.handle(method, path, handlers.clone())
        })
    }

    /// Resolves every route to its absolute path and its chain with the
    /// middleware of all enclosing groups in front, outermost first.
    pub(crate) fn flatten(
        self,
        base: &str,
        outer: &[H],
    ) -> Vec<(Method, String, HandlerChain<H>)> {
        let base = join_paths(base, &self.prefix);
        let mut middleware = outer.to_vec();
        middleware.extend(self.middleware);

        let mut routes = Vec::new();
        for entry in self.entries {
            match entry {
                Entry::Route {
                    method,
                    path,
                    handlers,
                } => {
                    let chain = handlers.prepend(&middleware);
                    routes.push((method, join_paths(&base, &path), chain));
                }
                Entry::Group(group) => routes.extend(group.flatten(&base, &middleware)),
            }
        }
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_joins_prefixes_and_middleware() {
        let group = RouteGroup::new("/api")
            .middleware("auth")
            .get("/users", "list")
            .post("/users/", "create")
            .group(
                RouteGroup::new("v2")
                    .middleware("trace")
                    .delete("/users/:id", "remove"),
            );

        let routes = group.flatten("/", &["logger"]);
        let routes: Vec<_> = routes
            .iter()
            .map(|(method, path, chain)| (method.as_str(), path.as_str(), chain.as_slice().to_vec()))
            .collect();

        assert_eq!(
            routes,
            [
                ("GET", "/api/users", vec!["logger", "auth", "list"]),
                ("POST", "/api/users/", vec!["logger", "auth", "create"]),
                (
                    "DELETE",
                    "/api/v2/users/:id",
                    vec!["logger", "auth", "trace", "remove"]
                ),
            ]
        );
    }

    #[test]
    fn test_any_covers_standard_methods() {
        let routes = RouteGroup::new("/").any("/ping", vec!["pong"]).flatten("/", &[]);
        let methods: Vec<_> = routes.into_iter().map(|(method, ..)| method).collect();
        assert_eq!(methods, Method::STANDARD);
    }

    #[test]
    fn test_empty_route_path_uses_group_prefix() {
        let routes = RouteGroup::new("/status").get("", "status").flatten("/", &[]);
        assert_eq!(routes[0].1, "/status");
    }
}
