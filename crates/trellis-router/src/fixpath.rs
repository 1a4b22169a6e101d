//! Case-insensitive path recovery.
//!
//! Only used as a fallback when an exact lookup failed, to suggest the
//! correctly cased URL. Comparison is ASCII case-insensitive; non-ASCII
//! bytes must match exactly.

use crate::node::{Node, NodeKind};

impl<H> Node<H> {
    /// Looks `path` up ignoring ASCII case and returns the path as it was
    /// registered, with captured values copied from the request.
    ///
    /// With `fix_trailing_slash`, a trailing slash is also added or removed
    /// when that is what it takes to reach a route.
    pub(crate) fn find_case_insensitive_path(
        &self,
        path: &str,
        fix_trailing_slash: bool,
    ) -> Option<String> {
        let mut fixed = Vec::with_capacity(path.len() + 1);
        if self.find_case_insensitive(path.as_bytes(), &mut fixed, fix_trailing_slash) {
            String::from_utf8(fixed).ok()
        } else {
            None
        }
    }

    fn find_case_insensitive(&self, mut path: &[u8], fixed: &mut Vec<u8>, fix: bool) -> bool {
        let mut n = self;
        // Set when a capture is followed by more pattern: the capture itself
        // may still be a route once a lone trailing `/` is dropped.
        let mut capture_has_handlers = false;

        while path.len() >= n.path.len() && path[..n.path.len()].eq_ignore_ascii_case(&n.path) {
            path = &path[n.path.len()..];
            fixed.extend_from_slice(&n.path);

            if path.is_empty() {
                if n.handlers.is_some() {
                    return true;
                }
                if fix && n.path == b"/" && n.wild_child && capture_has_handlers {
                    fixed.pop();
                    return true;
                }
                if fix {
                    if let Some(pos) = n.indices.iter().position(|&c| c == b'/') {
                        if n.children[pos].ends_route_with_slash() {
                            fixed.push(b'/');
                            return true;
                        }
                    }
                }
                return false;
            }

            if !n.wild_child {
                // Both the lower and the upper case variant may exist as
                // children, so every candidate has to be tried.
                let wanted = path[0].to_ascii_lowercase();
                for (pos, &index) in n.indices.iter().enumerate() {
                    if index.to_ascii_lowercase() == wanted {
                        let mark = fixed.len();
                        if n.children[pos].find_case_insensitive(path, fixed, fix) {
                            return true;
                        }
                        fixed.truncate(mark);
                    }
                }

                return fix && path == b"/" && n.handlers.is_some();
            }

            n = &n.children[0];
            match n.kind {
                NodeKind::Param => {
                    let end = path.iter().position(|&c| c == b'/').unwrap_or(path.len());
                    fixed.extend_from_slice(&path[..end]);

                    if end < path.len() {
                        if let Some(child) = n.children.first() {
                            capture_has_handlers = n.handlers.is_some();
                            path = &path[end..];
                            n = child;
                            continue;
                        }
                        return fix && path.len() == end + 1 && n.handlers.is_some();
                    }

                    if n.handlers.is_some() {
                        return true;
                    }
                    if fix {
                        if let [child] = n.children.as_slice() {
                            if child.path == b"/" && child.handlers.is_some() {
                                fixed.push(b'/');
                                return true;
                            }
                        }
                    }
                    return false;
                }
                NodeKind::CatchAll => {
                    fixed.extend_from_slice(path);
                    return true;
                }
                NodeKind::Static | NodeKind::Root => return false,
            }
        }

        // Nothing matched: try adding or removing a trailing slash.
        if fix {
            if path == b"/" {
                return capture_has_handlers;
            }
            if path.len() + 1 == n.path.len()
                && n.path[path.len()] == b'/'
                && path.eq_ignore_ascii_case(&n.path[..path.len()])
                && n.handlers.is_some()
            {
                fixed.extend_from_slice(&n.path);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::HandlerChain;
    use crate::node::Node;

    fn tree(routes: &[&'static str]) -> Node<&'static str> {
        let mut root = Node::root();
        for &route in routes {
            root.add_route(route, HandlerChain::single(route))
                .unwrap_or_else(|e| panic!("inserting {route}: {e}"));
        }
        root
    }

    #[test]
    fn test_recovers_registered_case() {
        let root = tree(&["/Users", "/Users/:id/Settings", "/docs/*path"]);

        assert_eq!(
            root.find_case_insensitive_path("/users", false).as_deref(),
            Some("/Users")
        );
        assert_eq!(
            root.find_case_insensitive_path("/USERS/Alice/settings", false)
                .as_deref(),
            Some("/Users/Alice/Settings")
        );
        assert_eq!(
            root.find_case_insensitive_path("/DOCS/Guide/Intro.md", false)
                .as_deref(),
            Some("/docs/Guide/Intro.md")
        );
        assert_eq!(root.find_case_insensitive_path("/teams", false), None);
    }

    #[test]
    fn test_tries_every_case_variant() {
        let root = tree(&["/ABC/x", "/abc/y"]);
        assert_eq!(
            root.find_case_insensitive_path("/abc/X", false).as_deref(),
            Some("/ABC/x")
        );
        assert_eq!(
            root.find_case_insensitive_path("/ABC/Y", false).as_deref(),
            Some("/abc/y")
        );
    }

    #[test]
    fn test_trailing_slash_fixing() {
        let root = tree(&["/Users", "/Teams/"]);

        assert_eq!(root.find_case_insensitive_path("/users/", false), None);
        assert_eq!(
            root.find_case_insensitive_path("/users/", true).as_deref(),
            Some("/Users")
        );
        assert_eq!(root.find_case_insensitive_path("/teams", false), None);
        assert_eq!(
            root.find_case_insensitive_path("/teams", true).as_deref(),
            Some("/Teams/")
        );
    }
}
