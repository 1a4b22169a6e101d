//! # trellis-router
//!
//! A radix-tree URL router.
//!
//! This crate provides:
//! - One compressed prefix tree per HTTP method
//! - Named captures (`:name`) and trailing catch-alls (`*name`)
//! - Trailing-slash and case-corrected redirect hints
//! - Middleware and route groups with prefixes
//!
//! Handlers are opaque: the router stores a chain of `H` per route and
//! hands it back on a match, so `H` can be a function pointer, a boxed
//! closure or just a name.
//!
//! ## Quick Start
//!
//! ```
//! use trellis_router::{Method, Params, Resolution, Router};
//!
//! let mut router = Router::new();
//! router.get("/", "index").unwrap();
//! router.get("/users/:id", "show_user").unwrap();
//! router.get("/static/*filepath", "assets").unwrap();
//!
//! let mut params = Params::with_capacity(router.max_params());
//! match router.resolve(&Method::Get, "/users/123", &mut params) {
//!     Resolution::Found { handlers, full_path } => {
//!         assert_eq!(handlers.last(), Some(&"show_user"));
//!         assert_eq!(full_path, "/users/:id");
//!         assert_eq!(params.get("id"), Some("123"));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Path Patterns
//!
//! - literal bytes match themselves;
//! - `:name` matches one path element, up to the next `/`;
//! - `*name` matches the rest of the path, `/` included, and must come last.
//!
//! A position in the tree holds either static children or one wildcard, so
//! `/user/:name` and `/user/profile` cannot both be registered.
//!
//! ## Redirects
//!
//! ```
//! use trellis_router::{Method, Params, Resolution, Router, RouterConfig};
//!
//! let config = RouterConfig::default().redirect_fixed_path(true);
//! let mut router = Router::with_config(config);
//! router.get("/About", "about").unwrap();
//!
//! let mut params = Params::new();
//! let Resolution::Redirect { location, status } =
//!     router.resolve(&Method::Get, "/about/", &mut params)
//! else {
//!     panic!("expected a redirect");
//! };
//! assert_eq!(location, "/About");
//! assert_eq!(status, 301);
//! ```

mod config;
mod error;
mod fixpath;
mod group;
mod handlers;
mod lookup;
mod method;
mod node;
mod params;
mod path;
mod route;
mod router;
mod tree;

pub use config::{Mode, RouterConfig};
pub use error::{Result, RouterError};
pub use group::RouteGroup;
pub use handlers::{HandlerChain, HandlerName, MAX_HANDLERS};
pub use lookup::Match;
pub use method::Method;
pub use params::{Param, Params};
pub use path::clean_path;
pub use route::Route;
pub use router::{Resolution, Router};
