//! Main router implementation.

use tracing::{debug, warn};

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::group::RouteGroup;
use crate::handlers::{HandlerChain, HandlerName};
use crate::lookup::Match;
use crate::method::Method;
use crate::params::Params;
use crate::path::{check_pattern, clean_path};
use crate::route::Route;
use crate::tree::MethodTrees;

/// What the serving layer should do with a request.
#[derive(Debug)]
pub enum Resolution<'a, H> {
    /// A route matched; its captures are in the caller's buffer.
    Found {
        /// The matched handler chain.
        handlers: &'a HandlerChain<H>,
        /// The pattern the route was registered with.
        full_path: &'a str,
    },
    /// The request should be redirected.
    Redirect {
        /// Where to redirect to.
        location: String,
        /// 301 for GET, 307 for everything else so the method and body
        /// are kept.
        status: u16,
    },
    /// The path exists for other methods only.
    MethodNotAllowed {
        /// Methods with a route for the path, in registration order.
        allowed: Vec<Method>,
    },
    /// Nothing matched.
    NotFound,
}

/// A radix-tree router mapping `(method, path)` to handler chains.
///
/// Routes are registered up front through `&mut self`; once built, the
/// router is only read, so it can be shared between threads (for example
/// behind an `Arc`) as long as `H` allows it.
///
/// ```
/// use trellis_router::{Method, Params, Router};
///
/// let mut router = Router::new();
/// router.get("/users/:id", "show_user").unwrap();
///
/// let mut params = Params::new();
/// let m = router.lookup(&Method::Get, "/users/42", &mut params, false);
/// assert_eq!(m.handlers.and_then(|chain| chain.last()), Some(&"show_user"));
/// assert_eq!(params.get("id"), Some("42"));
/// ```
#[derive(Debug)]
pub struct Router<H> {
    trees: MethodTrees<H>,
    /// Prepended to every route registered afterwards.
    middleware: Vec<H>,
    config: RouterConfig,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Creates an empty router with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Creates an empty router with the given configuration.
    pub fn with_config(config: RouterConfig) -> Self {
        if config.mode.is_debug() {
            warn!("router running in debug mode, use release mode in production");
        }
        Self {
            trees: MethodTrees::default(),
            middleware: Vec::new(),
            config,
        }
    }

    /// Returns the router configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Appends a handler to the middleware prepended to every route
    /// registered from now on.
    pub fn middleware(&mut self, handler: H) -> &mut Self {
        self.middleware.push(handler);
        self
    }

    /// Matches `path` against the tree of `method`.
    ///
    /// `params` is cleared first; its allocation is kept, so reusing one
    /// buffer per worker avoids allocating on every request. It holds the
    /// captures of the matched route, and is left empty when nothing
    /// matched. With `unescape`, captured values are percent-decoded.
    pub fn lookup<'a>(
        &'a self,
        method: &Method,
        path: &str,
        params: &mut Params,
        unescape: bool,
    ) -> Match<'a, H> {
        params.clear();
        let m = self
            .trees
            .get(method)
            .map_or_else(Match::not_found, |root| root.get_value(path, params, unescape));
        if !m.is_found() {
            params.clear();
        }
        m
    }

    /// Looks `path` up ignoring ASCII case and returns the path as it was
    /// registered, optionally adding or removing a trailing slash.
    ///
    /// ```
    /// use trellis_router::{Method, Router};
    ///
    /// let mut router = Router::new();
    /// router.get("/Users", "users").unwrap();
    /// assert_eq!(
    ///     router.find_case_corrected_path(&Method::Get, "/users/", true).as_deref(),
    ///     Some("/Users")
    /// );
    /// ```
    pub fn find_case_corrected_path(
        &self,
        method: &Method,
        path: &str,
        fix_trailing_slash: bool,
    ) -> Option<String> {
        self.trees
            .get(method)?
            .find_case_insensitive_path(path, fix_trailing_slash)
    }

    /// Largest number of captures any lookup can produce. A [`Params`]
    /// buffer of this capacity never reallocates.
    pub fn max_params(&self) -> usize {
        usize::from(self.trees.max_params())
    }

    /// Decides how to answer a request: a match, a redirect, "method not
    /// allowed" or "not found", according to the configuration.
    pub fn resolve<'a>(
        &'a self,
        method: &Method,
        path: &str,
        params: &mut Params,
    ) -> Resolution<'a, H> {
        let cleaned;
        let path = if self.config.remove_extra_slash {
            cleaned = clean_path(path);
            cleaned.as_str()
        } else {
            path
        };

        let m = self.lookup(method, path, params, self.config.unescape());
        if let Some(handlers) = m.handlers {
            return Resolution::Found {
                handlers,
                full_path: m.full_path.unwrap_or_default(),
            };
        }

        if *method != Method::Connect && path != "/" {
            if m.tsr && self.config.redirect_trailing_slash {
                let location = match path.strip_suffix('/') {
                    Some(stripped) if path.len() > 1 => stripped.to_string(),
                    _ => format!("{path}/"),
                };
                return redirect(method, path, location);
            }
            if self.config.redirect_fixed_path {
                if let Some(location) = self.find_case_corrected_path(
                    method,
                    &clean_path(path),
                    self.config.redirect_trailing_slash,
                ) {
                    return redirect(method, path, location);
                }
            }
        }

        if self.config.handle_method_not_allowed {
            let mut scratch = Params::new();
            let allowed: Vec<Method> = self
                .trees
                .iter()
                .filter(|(other, root)| {
                    scratch.clear();
                    *other != method && root.get_value(path, &mut scratch, false).is_found()
                })
                .map(|(other, _)| other.clone())
                .collect();
            if !allowed.is_empty() {
                return Resolution::MethodNotAllowed { allowed };
            }
        }

        Resolution::NotFound
    }
}

fn redirect<'a, H>(method: &Method, from: &str, location: String) -> Resolution<'a, H> {
    let status = if *method == Method::Get { 301 } else { 307 };
    debug!(status, from, to = %location, "redirecting request");
    Resolution::Redirect { location, status }
}

impl<H: Clone> Router<H> {
    /// Registers a handler chain for `method` and `path`.
    ///
    /// The router middleware is prepended to the chain. Fails when the
    /// pattern is malformed, conflicts with a registered route, or the
    /// chain is empty or too long.
    pub fn add_route(
        &mut self,
        method: Method,
        path: &str,
        handlers: impl Into<HandlerChain<H>>,
    ) -> Result<&mut Self> {
        check_pattern(path)?;
        let handlers = handlers.into();
        if handlers.is_empty() {
            return Err(RouterError::NoHandlers(path.to_string()));
        }
        let chain = handlers.prepend(&self.middleware);
        chain.check_len(path)?;

        let count = chain.len();
        self.trees.get_or_insert(&method).add_route(path, chain)?;
        if self.config.mode.is_debug() {
            debug!(method = %method, path, handlers = count, "registered route");
        }
        Ok(self)
    }

    /// Registers a route for a method given as a token, such as `"GET"` or
    /// an extension method like `"PURGE"`.
    pub fn handle(
        &mut self,
        method: &str,
        path: &str,
        handlers: impl Into<HandlerChain<H>>,
    ) -> Result<&mut Self> {
        let method = Method::parse(method)?;
        self.add_route(method, path, handlers)
    }

    /// Adds a GET route.
    pub fn get(&mut self, path: &str, handler: H) -> Result<&mut Self> {
        self.add_route(Method::Get, path, HandlerChain::single(handler))
    }

    /// Adds a POST route.
    pub fn post(&mut self, path: &str, handler: H) -> Result<&mut Self> {
        self.add_route(Method::Post, path, HandlerChain::single(handler))
    }

    /// Adds a PUT route.
    pub fn put(&mut self, path: &str, handler: H) -> Result<&mut Self> {
        self.add_route(Method::Put, path, HandlerChain::single(handler))
    }

    /// Adds a PATCH route.
    pub fn patch(&mut self, path: &str, handler: H) -> Result<&mut Self> {
        self.add_route(Method::Patch, path, HandlerChain::single(handler))
    }

    /// Adds a DELETE route.
    pub fn delete(&mut self, path: &str, handler: H) -> Result<&mut Self> {
        self.add_route(Method::Delete, path, HandlerChain::single(handler))
    }

    /// Adds a HEAD route.
    pub fn head(&mut self, path: &str, handler: H) -> Result<&mut Self> {
        self.add_route(Method::Head, path, HandlerChain::single(handler))
    }

    /// Adds an OPTIONS route.
    pub fn options(&mut self, path: &str, handler: H) -> Result<&mut Self> {
        self.add_route(Method::Options, path, HandlerChain::single(handler))
    }

    /// Registers the same chain for every standard method.
    pub fn any(&mut self, path: &str, handlers: impl Into<HandlerChain<H>>) -> Result<&mut Self> {
        let handlers = handlers.into();
        for method in Method::STANDARD {
            self.add_route(method, path, handlers.clone())?;
        }
        Ok(self)
    }

    /// Registers every route of a group, stopping at the first failure.
    pub fn mount(&mut self, group: RouteGroup<H>) -> Result<&mut Self> {
        for (method, path, handlers) in group.flatten("/", &[]) {
            self.add_route(method, &path, handlers)?;
        }
        Ok(self)
    }
}

impl<H: HandlerName> Router<H> {
    /// Lists every registered route, grouped by method in registration
    /// order.
    pub fn routes(&self) -> Vec<Route> {
        let mut routes = Vec::new();
        for (method, root) in self.trees.iter() {
            root.walk(&mut Vec::new(), &mut |pattern: &[u8], handlers: &HandlerChain<H>| {
                routes.push(Route {
                    method: method.clone(),
                    path: String::from_utf8_lossy(pattern).into_owned(),
                    handler: handlers
                        .last()
                        .map(|h| h.handler_name().into_owned())
                        .unwrap_or_default(),
                    handlers: handlers.len(),
                });
            });
        }
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    fn quiet() -> RouterConfig {
        RouterConfig::default().mode(Mode::Test)
    }

    #[test]
    fn test_registration_errors() {
        let mut router: Router<&str> = Router::with_config(quiet());

        assert_eq!(
            router.get("users", "h").unwrap_err(),
            RouterError::EmptyPath("users".to_string())
        );
        assert_eq!(
            router.handle("", "/", vec!["h"]).unwrap_err(),
            RouterError::EmptyMethod
        );
        assert_eq!(
            router.handle("GET /", "/", vec!["h"]).unwrap_err(),
            RouterError::InvalidMethod("GET /".to_string())
        );
        assert_eq!(
            router.add_route(Method::Get, "/", Vec::<&str>::new()).unwrap_err(),
            RouterError::NoHandlers("/".to_string())
        );

        router.get("/users", "list").unwrap();
        assert_eq!(
            router.get("/users", "again").unwrap_err(),
            RouterError::DuplicateRoute("/users".to_string())
        );
    }

    #[test]
    fn test_middleware_is_prepended() {
        let mut router = Router::with_config(quiet());
        router.get("/open", "open").unwrap();
        router.middleware("logger").middleware("recovery");
        router.get("/closed", "closed").unwrap();

        let mut params = Params::new();
        let open = router.lookup(&Method::Get, "/open", &mut params, false);
        assert_eq!(open.handlers.unwrap().as_slice(), ["open"]);
        let closed = router.lookup(&Method::Get, "/closed", &mut params, false);
        assert_eq!(
            closed.handlers.unwrap().as_slice(),
            ["logger", "recovery", "closed"]
        );
    }

    #[test]
    fn test_too_many_handlers() {
        let mut router = Router::with_config(quiet());
        for _ in 0..60 {
            router.middleware("mw");
        }
        router.add_route(Method::Get, "/ok", vec!["a", "b"]).unwrap();
        assert_eq!(
            router
                .add_route(Method::Get, "/too-long", vec!["a", "b", "c"])
                .unwrap_err(),
            RouterError::TooManyHandlers {
                path: "/too-long".to_string(),
                count: 63,
                max: 62,
            }
        );
    }

    #[test]
    fn test_extension_method_tokens() {
        let mut router: Router<&str> = Router::with_config(quiet());
        router.handle("M-SEARCH", "/", vec!["discover"]).unwrap();

        let mut params = Params::new();
        let method = Method::parse("M-SEARCH").unwrap();
        assert!(router.lookup(&method, "/", &mut params, false).is_found());
        assert!(!router.lookup(&Method::Get, "/", &mut params, false).is_found());
    }

    #[test]
    fn test_failed_lookup_leaves_no_captures() {
        let mut router: Router<&str> = Router::with_config(quiet());
        router.get("/users/:id", "show").unwrap();

        let mut params = Params::new();
        let m = router.lookup(&Method::Get, "/users/7/x", &mut params, false);
        assert!(!m.is_found());
        assert!(params.is_empty());

        assert!(matches!(
            router.resolve(&Method::Get, "/users/7/x", &mut params),
            Resolution::NotFound
        ));
        assert!(params.is_empty());

        assert!(router.lookup(&Method::Get, "/users/7", &mut params, false).is_found());
        assert_eq!(params.get("id"), Some("7"));
    }

    #[test]
    fn test_lookup_unknown_method() {
        let mut router = Router::with_config(quiet());
        router.get("/", "index").unwrap();

        let mut params = Params::new();
        let m = router.lookup(&Method::Post, "/", &mut params, false);
        assert!(!m.is_found());
        assert!(!m.tsr);
        assert_eq!(router.find_case_corrected_path(&Method::Post, "/", true), None);
    }

    #[test]
    fn test_routes_listing() {
        let mut router = Router::with_config(quiet());
        router.middleware("logger");
        router.get("/users/:id", "show").unwrap();
        router.post("/users", "create").unwrap();
        router.get("/files/*path", "files").unwrap();

        let mut routes = router.routes();
        routes.sort_by(|a, b| (a.method.as_str(), &a.path).cmp(&(b.method.as_str(), &b.path)));
        let listed: Vec<_> = routes
            .iter()
            .map(|r| (r.method.as_str(), r.path.as_str(), r.handler.as_str(), r.handlers))
            .collect();
        assert_eq!(
            listed,
            [
                ("GET", "/files/*path", "files", 2),
                ("GET", "/users/:id", "show", 2),
                ("POST", "/users", "create", 2),
            ]
        );
        assert_eq!(router.max_params(), 1);
    }
}
