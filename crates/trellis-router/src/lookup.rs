//! Request path lookup.

use crate::handlers::HandlerChain;
use crate::node::{Node, NodeKind};
use crate::params::Params;

/// The outcome of matching a concrete path against a method tree.
///
/// At most one of `handlers` and `tsr` is meaningful: either a route was
/// found, or the caller may suggest adding or removing a trailing slash.
/// Both absent means not found.
#[derive(Debug)]
pub struct Match<'a, H> {
    /// The handler chain of the matched route.
    pub handlers: Option<&'a HandlerChain<H>>,
    /// The pattern the matched route was registered with.
    pub full_path: Option<&'a str>,
    /// Whether a route exists for the path with a trailing slash added or
    /// removed.
    pub tsr: bool,
}

impl<H> Clone for Match<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Match<'_, H> {}

impl<'a, H> Match<'a, H> {
    pub(crate) const fn not_found() -> Self {
        Self {
            handlers: None,
            full_path: None,
            tsr: false,
        }
    }

    const fn redirect(tsr: bool) -> Self {
        Self {
            handlers: None,
            full_path: None,
            tsr,
        }
    }

    fn found(node: &'a Node<H>) -> Self {
        Self {
            handlers: node.handlers.as_ref(),
            full_path: Some(node.full_path.as_str()),
            tsr: false,
        }
    }

    /// Returns whether a route matched.
    pub const fn is_found(&self) -> bool {
        self.handlers.is_some()
    }
}

impl<H> Node<H> {
    /// Matches `path` below this node, appending captures to `params`.
    ///
    /// Never allocates tree state and never recurses; the traversal is
    /// bounded by the path length and the tree depth.
    pub(crate) fn get_value<'a>(
        &'a self,
        path: &str,
        params: &mut Params,
        unescape: bool,
    ) -> Match<'a, H> {
        let mut n = self;
        let mut path = path.as_bytes();
        // Whether the node we descended from is a route, so that a lone
        // trailing `/` left over below it can be dropped.
        let mut parent_has_handlers = false;

        loop {
            let prefix = n.path.as_slice();

            if path == prefix {
                if n.handlers.is_some() {
                    return Match::found(n);
                }

                if path == b"/" && n.wild_child && n.kind != NodeKind::Root {
                    return Match::redirect(parent_has_handlers);
                }

                // Suggest the same path with a trailing slash.
                if let Some(pos) = n.indices.iter().position(|&c| c == b'/') {
                    return Match::redirect(n.children[pos].ends_route_with_slash());
                }
                return Match::not_found();
            }

            if path.len() > prefix.len() && path.starts_with(prefix) {
                path = &path[prefix.len()..];

                if !n.wild_child {
                    let c = path[0];
                    if let Some(pos) = n.indices.iter().position(|&b| b == c) {
                        parent_has_handlers = n.handlers.is_some();
                        n = &n.children[pos];
                        continue;
                    }

                    // Removing the trailing slash would reach this route.
                    return Match::redirect(path == b"/" && n.handlers.is_some());
                }

                parent_has_handlers = n.handlers.is_some();
                n = &n.children[0];
                match n.kind {
                    NodeKind::Param => {
                        let end = path.iter().position(|&c| c == b'/').unwrap_or(path.len());
                        params.capture(n.max_params, &n.path[1..], &path[..end], unescape);

                        if end < path.len() {
                            if let Some(child) = n.children.first() {
                                parent_has_handlers = n.handlers.is_some();
                                path = &path[end..];
                                n = child;
                                continue;
                            }
                            return Match::redirect(
                                path.len() == end + 1 && n.handlers.is_some(),
                            );
                        }

                        if n.handlers.is_some() {
                            return Match::found(n);
                        }
                        if let [child] = n.children.as_slice() {
                            return Match::redirect(
                                child.path == b"/" && child.handlers.is_some(),
                            );
                        }
                        return Match::not_found();
                    }
                    NodeKind::CatchAll => {
                        params.capture(n.max_params, &n.path[2..], path, unescape);
                        return Match::found(n);
                    }
                    NodeKind::Static | NodeKind::Root => return Match::not_found(),
                }
            }

            // Adding a trailing slash would reach this route.
            let tsr = (path == b"/" && parent_has_handlers)
                || (prefix.len() == path.len() + 1
                    && prefix[path.len()] == b'/'
                    && path == &prefix[..path.len()]
                    && n.handlers.is_some());
            return Match::redirect(tsr);
        }
    }

    /// Whether this `/`-indexed child completes a route by itself: either a
    /// bare `/` node with handlers, or a catch-all anchor.
    pub(crate) fn ends_route_with_slash(&self) -> bool {
        (self.path.len() == 1 && self.handlers.is_some())
            || (self.kind == NodeKind::CatchAll
                && self.children.first().is_some_and(|leaf| leaf.handlers.is_some()))
    }
}
