//! Radix tree nodes and route insertion.
//!
//! Each node stores the bytes it contributes to a path. Chains of
//! single-child nodes are merged, so a node's segment may span several path
//! elements but never crosses a wildcard. A node either has static children,
//! dispatched by the first byte of their segment through `indices`, or a
//! single wildcard child; never both.
//!
//! A catch-all is stored as two nodes: an empty anchor reachable through the
//! `/` index of its parent, and a leaf holding `/*name` plus the handlers.

use std::mem;

use crate::error::{Result, RouterError};
use crate::handlers::HandlerChain;
use crate::path::{count_params, find_wildcard, longest_common_prefix};

/// What a node matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Literal bytes.
    #[default]
    Static,
    /// The top node of a method tree.
    Root,
    /// `:name`, one path element.
    Param,
    /// `*name`, the rest of the path.
    CatchAll,
}

#[derive(Debug)]
pub(crate) struct Node<H> {
    pub(crate) path: Vec<u8>,
    /// First byte of each child's segment, parallel to `children`.
    pub(crate) indices: Vec<u8>,
    pub(crate) children: Vec<Node<H>>,
    pub(crate) handlers: Option<HandlerChain<H>>,
    /// Routes registered in this subtree.
    pub(crate) priority: u32,
    pub(crate) kind: NodeKind,
    /// Most captures any route through this node produces.
    pub(crate) max_params: u8,
    pub(crate) wild_child: bool,
    /// The pattern this node was created for.
    pub(crate) full_path: String,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            indices: Vec::new(),
            children: Vec::new(),
            handlers: None,
            priority: 0,
            kind: NodeKind::Static,
            max_params: 0,
            wild_child: false,
            full_path: String::new(),
        }
    }
}

impl<H> Node<H> {
    /// Creates an empty method root.
    pub(crate) fn root() -> Self {
        Self {
            full_path: "/".to_string(),
            ..Self::default()
        }
    }

    /// Bumps the priority of the child at `pos` and moves it ahead of every
    /// sibling with a lower priority. Returns the child's new position.
    fn increment_child_prio(&mut self, pos: usize) -> usize {
        self.children[pos].priority += 1;
        let priority = self.children[pos].priority;

        let mut new_pos = pos;
        while new_pos > 0 && self.children[new_pos - 1].priority < priority {
            self.children.swap(new_pos - 1, new_pos);
            self.indices.swap(new_pos - 1, new_pos);
            new_pos -= 1;
        }
        new_pos
    }

    /// Adds a route for `path`. Not safe to run concurrently with lookups.
    ///
    /// `path` must already have passed `check_pattern`.
    pub(crate) fn add_route(&mut self, path: &str, handlers: HandlerChain<H>) -> Result<()> {
        let full_path = path;
        let mut path = path.as_bytes();
        let mut num_params = count_params(path);

        self.priority += 1;

        if self.path.is_empty() && self.children.is_empty() {
            self.max_params = self.max_params.max(num_params);
            self.insert_child(num_params, path, full_path, handlers)?;
            self.kind = NodeKind::Root;
            return Ok(());
        }

        let mut parent_full_path_index = 0;
        let mut n = self;

        loop {
            n.max_params = n.max_params.max(num_params);

            // The common prefix never holds ':' or '*', wildcards only
            // live in their own nodes.
            let i = longest_common_prefix(path, &n.path);

            if i < n.path.len() {
                n.split(i, &full_path.as_bytes()[..parent_full_path_index + i]);
            }

            if i == path.len() {
                if n.handlers.is_some() {
                    return Err(RouterError::DuplicateRoute(full_path.to_string()));
                }
                n.handlers = Some(handlers);
                n.full_path = full_path.to_string();
                return Ok(());
            }

            path = &path[i..];

            if n.wild_child {
                parent_full_path_index += n.path.len();
                n = &mut n.children[0];
                n.priority += 1;
                n.max_params = n.max_params.max(num_params);
                num_params = num_params.saturating_sub(1);

                // Same wildcard, and not a longer one like `:name` vs `:names`.
                let len = n.path.len();
                if path.len() >= len
                    && n.path[..] == path[..len]
                    && (len == path.len() || path[len] == b'/')
                {
                    continue;
                }
                return Err(n.wildcard_conflict(path, full_path));
            }

            let c = path[0];

            // `/` following a param.
            if n.kind == NodeKind::Param && c == b'/' && n.children.len() == 1 {
                parent_full_path_index += n.path.len();
                n = &mut n.children[0];
                n.priority += 1;
                continue;
            }

            if let Some(pos) = n.indices.iter().position(|&b| b == c) {
                parent_full_path_index += n.path.len();
                let pos = n.increment_child_prio(pos);
                n = &mut n.children[pos];
                continue;
            }

            if c != b':' && c != b'*' {
                n.indices.push(c);
                n.children.push(Node {
                    max_params: num_params,
                    full_path: full_path.to_string(),
                    ..Node::default()
                });
                let pos = n.increment_child_prio(n.indices.len() - 1);
                n = &mut n.children[pos];
            }
            return n.insert_child(num_params, path, full_path, handlers);
        }
    }

    /// Splits this node at byte `i`: the tail of the segment, the children
    /// and the handlers move into a new single child.
    fn split(&mut self, i: usize, full_path: &[u8]) {
        let child_max_params = self
            .children
            .iter()
            .map(|child| child.max_params)
            .max()
            .unwrap_or(0);

        let child = Node {
            path: self.path[i..].to_vec(),
            indices: mem::take(&mut self.indices),
            children: mem::take(&mut self.children),
            handlers: self.handlers.take(),
            priority: self.priority - 1,
            kind: NodeKind::Static,
            max_params: child_max_params,
            wild_child: self.wild_child,
            full_path: mem::take(&mut self.full_path),
        };

        self.indices = vec![self.path[i]];
        self.path.truncate(i);
        self.children = vec![child];
        self.wild_child = false;
        self.full_path = String::from_utf8_lossy(full_path).into_owned();
    }

    /// Builds the conflict error for `path` arriving at this wildcard node.
    fn wildcard_conflict(&self, path: &[u8], full_path: &str) -> RouterError {
        let segment = if self.kind == NodeKind::CatchAll {
            path
        } else {
            path.split(|&c| c == b'/').next().unwrap_or(path)
        };
        let segment = String::from_utf8_lossy(segment).into_owned();
        let prefix_end = full_path.find(segment.as_str()).unwrap_or(0);
        let existing = format!(
            "{}{}",
            &full_path[..prefix_end],
            String::from_utf8_lossy(&self.path)
        );
        RouterError::WildcardConflict {
            path: full_path.to_string(),
            segment,
            existing,
        }
    }

    /// Builds the subtree for the remaining `path` below this node, which
    /// has no children yet unless `path` starts with a wildcard.
    fn insert_child(
        &mut self,
        mut num_params: u8,
        mut path: &[u8],
        full_path: &str,
        handlers: HandlerChain<H>,
    ) -> Result<()> {
        let mut n = self;

        while num_params > 0 {
            let Some(wildcard) = find_wildcard(path) else {
                break;
            };

            if !wildcard.valid || wildcard.name.len() < 2 {
                return Err(RouterError::InvalidWildcardName {
                    path: full_path.to_string(),
                    wildcard: wildcard.to_lossy_string(),
                });
            }

            // Static children would become unreachable behind a wildcard.
            if let Some(child) = n.children.first() {
                return Err(RouterError::WildcardConflict {
                    path: full_path.to_string(),
                    segment: wildcard.to_lossy_string(),
                    existing: String::from_utf8_lossy(&child.path).into_owned(),
                });
            }

            let i = wildcard.start;
            let name = wildcard.name;

            if !wildcard.is_catch_all() {
                if i > 0 {
                    n.path = path[..i].to_vec();
                    path = &path[i..];
                }

                n.wild_child = true;
                n.children = vec![Node {
                    path: name.to_vec(),
                    kind: NodeKind::Param,
                    max_params: num_params,
                    full_path: full_path.to_string(),
                    ..Node::default()
                }];
                n = &mut n.children[0];
                n.priority += 1;
                num_params -= 1;

                // More pattern follows: it starts with '/'.
                if name.len() < path.len() {
                    path = &path[name.len()..];
                    n.children = vec![Node {
                        max_params: num_params,
                        priority: 1,
                        full_path: full_path.to_string(),
                        ..Node::default()
                    }];
                    n = &mut n.children[0];
                    continue;
                }

                n.handlers = Some(handlers);
                return Ok(());
            }

            if i + name.len() != path.len() || num_params > 1 {
                return Err(RouterError::MisplacedCatchAll(full_path.to_string()));
            }

            if n.path.last() == Some(&b'/') {
                return Err(RouterError::WildcardConflict {
                    path: full_path.to_string(),
                    segment: wildcard.to_lossy_string(),
                    existing: String::from_utf8_lossy(&n.path).into_owned(),
                });
            }

            if i == 0 || path[i - 1] != b'/' {
                return Err(RouterError::MisplacedCatchAll(full_path.to_string()));
            }
            let i = i - 1;

            n.path = path[..i].to_vec();
            n.max_params = n.max_params.max(1);
            n.indices = vec![b'/'];
            n.children = vec![Node {
                wild_child: true,
                kind: NodeKind::CatchAll,
                max_params: 1,
                priority: 1,
                full_path: full_path.to_string(),
                children: vec![Node {
                    path: path[i..].to_vec(),
                    kind: NodeKind::CatchAll,
                    max_params: 1,
                    handlers: Some(handlers),
                    priority: 1,
                    full_path: full_path.to_string(),
                    ..Node::default()
                }],
                ..Node::default()
            }];
            return Ok(());
        }

        n.path = path.to_vec();
        n.handlers = Some(handlers);
        n.full_path = full_path.to_string();
        Ok(())
    }

    /// Calls `visit` with the pattern and handlers of every route below this
    /// node, depth first, in child order.
    pub(crate) fn walk<'a, F>(&'a self, prefix: &mut Vec<u8>, visit: &mut F)
    where
        F: FnMut(&[u8], &'a HandlerChain<H>),
    {
        let len = prefix.len();
        prefix.extend_from_slice(&self.path);
        if let Some(handlers) = &self.handlers {
            visit(prefix, handlers);
        }
        for child in &self.children {
            child.walk(prefix, visit);
        }
        prefix.truncate(len);
    }
}
