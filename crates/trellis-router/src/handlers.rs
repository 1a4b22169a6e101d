//! Opaque handler chains.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Result, RouterError};

/// Largest number of handlers a single route may carry, middleware
/// included.
pub const MAX_HANDLERS: usize = 62;

/// An ordered chain of handlers attached to a route.
///
/// The router never inspects the handlers; it only stores the chain and
/// hands it back on a match. By convention the last element is the route's
/// own handler and everything before it is middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerChain<H> {
    handlers: Vec<H>,
}

impl<H> HandlerChain<H> {
    /// Creates a chain holding a single handler.
    pub fn single(handler: H) -> Self {
        Self {
            handlers: vec![handler],
        }
    }

    /// Returns the number of handlers in the chain.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns the main handler, i.e. the last one.
    pub fn last(&self) -> Option<&H> {
        self.handlers.last()
    }

    /// Returns an iterator over the handlers, outermost first.
    pub fn iter(&self) -> std::slice::Iter<'_, H> {
        self.handlers.iter()
    }

    /// Returns the handlers as a slice.
    pub fn as_slice(&self) -> &[H] {
        &self.handlers
    }

    /// Rejects chains longer than [`MAX_HANDLERS`].
    pub(crate) fn check_len(&self, path: &str) -> Result<()> {
        if self.handlers.len() > MAX_HANDLERS {
            return Err(RouterError::TooManyHandlers {
                path: path.to_string(),
                count: self.handlers.len(),
                max: MAX_HANDLERS,
            });
        }
        Ok(())
    }
}

impl<H: Clone> HandlerChain<H> {
    /// Returns `prefix` followed by this chain.
    pub(crate) fn prepend(&self, prefix: &[H]) -> Self {
        let mut handlers = Vec::with_capacity(prefix.len() + self.handlers.len());
        handlers.extend_from_slice(prefix);
        handlers.extend_from_slice(&self.handlers);
        Self { handlers }
    }
}

impl<H> From<Vec<H>> for HandlerChain<H> {
    fn from(handlers: Vec<H>) -> Self {
        Self { handlers }
    }
}

impl<H> FromIterator<H> for HandlerChain<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        Self {
            handlers: iter.into_iter().collect(),
        }
    }
}

impl<'a, H> IntoIterator for &'a HandlerChain<H> {
    type Item = &'a H;
    type IntoIter = std::slice::Iter<'a, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.iter()
    }
}

/// Gives a handler a readable identity for route listings.
pub trait HandlerName {
    /// Returns the name reported by `Router::routes`.
    fn handler_name(&self) -> Cow<'_, str>;
}

impl HandlerName for str {
    fn handler_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl HandlerName for String {
    fn handler_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: HandlerName + ?Sized> HandlerName for &T {
    fn handler_name(&self) -> Cow<'_, str> {
        (**self).handler_name()
    }
}

impl<T: HandlerName + ?Sized> HandlerName for Box<T> {
    fn handler_name(&self) -> Cow<'_, str> {
        (**self).handler_name()
    }
}

impl<T: HandlerName + ?Sized> HandlerName for Rc<T> {
    fn handler_name(&self) -> Cow<'_, str> {
        (**self).handler_name()
    }
}

impl<T: HandlerName + ?Sized> HandlerName for Arc<T> {
    fn handler_name(&self) -> Cow<'_, str> {
        (**self).handler_name()
    }
}
