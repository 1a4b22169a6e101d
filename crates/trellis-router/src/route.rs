//! Read-only view of registered routes.

use serde::Serialize;

use crate::method::Method;

/// A registered route, as reported by [`crate::Router::routes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// The pattern the route was registered with.
    pub path: String,
    /// Name of the route's own (last) handler.
    pub handler: String,
    /// Length of the full chain, middleware included.
    pub handlers: usize,
}
