//! JSON route tables.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use trellis_router::{Method, Mode, RouteGroup, Router, RouterConfig};

/// A route table as read from disk.
///
/// ```json
/// {
///   "config": { "redirect_fixed_path": true },
///   "middleware": ["logger"],
///   "routes": [{ "method": "GET", "path": "/users/:id", "handlers": ["show_user"] }],
///   "groups": [{ "prefix": "/api", "middleware": ["auth"], "routes": [] }]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteTable {
    pub config: RouterConfig,
    /// Router-level middleware, prepended to every route.
    pub middleware: Vec<String>,
    pub routes: Vec<RouteEntry>,
    pub groups: Vec<GroupEntry>,
}

/// One route: a method, a pattern and its handler names.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    pub method: Method,
    pub path: String,
    pub handlers: Vec<String>,
}

/// A group of routes sharing a prefix and middleware.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupEntry {
    pub prefix: String,
    pub middleware: Vec<String>,
    pub routes: Vec<RouteEntry>,
    pub groups: Vec<GroupEntry>,
}

impl GroupEntry {
    fn into_group(self) -> RouteGroup<String> {
        let mut group = RouteGroup::new(&self.prefix);
        for handler in self.middleware {
            group = group.middleware(handler);
        }
        for route in self.routes {
            group = group.handle(route.method, &route.path, route.handlers);
        }
        for nested in self.groups {
            group = group.group(nested.into_group());
        }
        group
    }
}

impl RouteTable {
    /// Reads a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse route table {}", path.display()))
    }

    /// Builds the router, registering plain routes before groups.
    ///
    /// `mode` overrides the mode of the table's configuration.
    pub fn build(self, mode: Option<Mode>) -> Result<Router<String>> {
        let mut config = self.config;
        if let Some(mode) = mode {
            config.mode = mode;
        }

        let mut router = Router::with_config(config);
        for handler in self.middleware {
            router.middleware(handler);
        }
        for route in self.routes {
            router
                .add_route(route.method.clone(), &route.path, route.handlers)
                .with_context(|| format!("failed to register {} {}", route.method, route.path))?;
        }
        for group in self.groups {
            let prefix = group.prefix.clone();
            router
                .mount(group.into_group())
                .with_context(|| format!("failed to mount group '{prefix}'"))?;
        }
        Ok(router)
    }
}
