#![allow(dead_code)]

use trellis_router::{Method, Mode, Params, Router, RouterConfig, RouterError};

/// Quiet configuration for tests.
pub fn config() -> RouterConfig {
    RouterConfig::default().mode(Mode::Test)
}

/// Builds a router with one GET route per pattern; each route's handler is
/// its own pattern.
pub fn router(routes: &[&'static str]) -> Router<&'static str> {
    let mut router = Router::with_config(config());
    for route in routes {
        router
            .get(route, *route)
            .unwrap_or_else(|e| panic!("Failed to register {route}: {e}"));
    }
    router
}

/// Registers `routes` in order and returns, per route, whether it failed.
pub fn register_all(routes: &[&'static str]) -> Vec<(&'static str, Result<(), RouterError>)> {
    let mut router: Router<&'static str> = Router::with_config(config());
    routes
        .iter()
        .map(|route| (*route, router.get(route, *route).map(|_| ())))
        .collect()
}

/// Result of a GET lookup: the handler, the captures and the TSR hint.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub handler: Option<&'static str>,
    pub params: Vec<(String, String)>,
    pub tsr: bool,
}

pub fn get(router: &Router<&'static str>, path: &str) -> Outcome {
    let mut params = Params::new();
    let m = router.lookup(&Method::Get, path, &mut params, false);
    Outcome {
        handler: m.handlers.and_then(|chain| chain.last().copied()),
        params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        tsr: m.tsr,
    }
}

pub fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
