//! Error types for route registration.

use thiserror::Error;

/// Errors raised while building a routing table.
///
/// Every variant is a registration-time failure. Lookups never fail: a
/// missing route or a trailing-slash hint is an ordinary outcome, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The HTTP method token is empty.
    #[error("HTTP method must not be empty")]
    EmptyMethod,

    /// The HTTP method token contains whitespace or control characters.
    #[error("HTTP method '{0}' is not valid")]
    InvalidMethod(String),

    /// The path pattern does not start with `/`.
    #[error("path must begin with '/', got '{0}'")]
    EmptyPath(String),

    /// No handler was given for the route.
    #[error("at least one handler is required for path '{0}'")]
    NoHandlers(String),

    /// A wildcard and a static segment (or two different wildcards) would
    /// share the same tree position.
    #[error("'{segment}' in new path '{path}' conflicts with existing '{existing}'")]
    WildcardConflict {
        /// The full pattern being registered.
        path: String,
        /// The offending part of the new pattern.
        segment: String,
        /// The part of the tree it collides with.
        existing: String,
    },

    /// A handler chain is already attached to this pattern.
    #[error("handlers are already registered for path '{0}'")]
    DuplicateRoute(String),

    /// A wildcard without a name, or a segment holding more than one
    /// wildcard.
    #[error("invalid wildcard '{wildcard}' in path '{path}'")]
    InvalidWildcardName {
        /// The full pattern being registered.
        path: String,
        /// The wildcard as written, sigil included.
        wildcard: String,
    },

    /// A catch-all that is not the last element of the pattern or does not
    /// directly follow a `/`.
    #[error("catch-all routes are only allowed at the end of the path, after a '/', in path '{0}'")]
    MisplacedCatchAll(String),

    /// The combined handler chain is longer than [`crate::MAX_HANDLERS`].
    #[error("too many handlers for path '{path}': {count} (max {max})")]
    TooManyHandlers {
        /// The full pattern being registered.
        path: String,
        /// Length of the rejected chain.
        count: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// Unknown router mode name.
    #[error("unknown router mode '{0}' (expected debug, release or test)")]
    InvalidMode(String),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
