//! HTTP method tokens.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s\p{Cc}]+$").expect("method token regex is valid"));

/// An HTTP request method.
///
/// Each method owns an independent routing tree. Besides the standard
/// verbs, any other token is accepted as an extension method so that
/// custom verbs such as `PURGE` or `M-SEARCH` can be routed too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    /// GET method
    Get,
    /// HEAD method
    Head,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
    /// CONNECT method
    Connect,
    /// OPTIONS method
    Options,
    /// TRACE method
    Trace,
    /// Any other token, kept verbatim.
    Extension(String),
}

impl Method {
    /// The standard methods, in the order `Router::any` registers them.
    pub const STANDARD: [Self; 9] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Head,
        Self::Options,
        Self::Delete,
        Self::Connect,
        Self::Trace,
    ];

    /// Parses a method token.
    ///
    /// Tokens are case-sensitive, so `get` is an extension method distinct
    /// from `GET`. Whitespace and control characters are rejected.
    ///
    /// ```
    /// use trellis_router::Method;
    ///
    /// assert_eq!(Method::parse("GET").unwrap(), Method::Get);
    /// assert_eq!(
    ///     Method::parse("PURGE").unwrap(),
    ///     Method::Extension("PURGE".to_string())
    /// );
    /// assert!(Method::parse("GET /").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self> {
        let method = match token {
            "" => return Err(RouterError::EmptyMethod),
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "CONNECT" => Self::Connect,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            other if TOKEN.is_match(other) => Self::Extension(other.to_string()),
            other => return Err(RouterError::InvalidMethod(other.to_string())),
        };
        Ok(method)
    }

    /// Returns the method as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Extension(token) => token.as_str(),
        }
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Method {
    type Error = RouterError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
