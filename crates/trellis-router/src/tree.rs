//! One routing tree per HTTP method.

use crate::method::Method;
use crate::node::Node;

/// The per-method trees, in the order their methods were first registered.
///
/// There are rarely more than a handful of methods in use, so a linear scan
/// beats hashing here.
#[derive(Debug)]
pub(crate) struct MethodTrees<H> {
    trees: Vec<(Method, Node<H>)>,
}

impl<H> Default for MethodTrees<H> {
    fn default() -> Self {
        Self { trees: Vec::new() }
    }
}

impl<H> MethodTrees<H> {
    /// Returns the tree for `method`, if any route was registered for it.
    pub(crate) fn get(&self, method: &Method) -> Option<&Node<H>> {
        self.trees
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, root)| root)
    }

    /// Returns the tree for `method`, creating an empty one on first use.
    pub(crate) fn get_or_insert(&mut self, method: &Method) -> &mut Node<H> {
        let pos = match self.trees.iter().position(|(m, _)| m == method) {
            Some(pos) => pos,
            None => {
                self.trees.push((method.clone(), Node::root()));
                self.trees.len() - 1
            }
        };
        &mut self.trees[pos].1
    }

    /// Iterates over `(method, root)` pairs in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Method, &Node<H>)> {
        self.trees.iter().map(|(method, root)| (method, root))
    }

    /// Largest capture count over every tree.
    pub(crate) fn max_params(&self) -> u8 {
        self.trees
            .iter()
            .map(|(_, root)| root.max_params)
            .max()
            .unwrap_or(0)
    }
}
