//! Router configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

/// How chatty the router is while routes are registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Log every registered route and warn at start-up.
    #[default]
    Debug,
    /// Quiet.
    Release,
    /// Quiet; meant for test suites.
    Test,
}

impl Mode {
    /// Parses a mode name. The empty string selects [`Mode::Debug`].
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "" | "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "test" => Ok(Self::Test),
            other => Err(RouterError::InvalidMode(other.to_string())),
        }
    }

    /// Returns the mode name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
            Self::Test => "test",
        }
    }

    /// Returns whether this is [`Mode::Debug`].
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl FromStr for Mode {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior switches for [`crate::Router`].
///
/// Every field has a default, so a partial JSON object deserializes into a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging mode.
    pub mode: Mode,
    /// Redirect when the path with a trailing slash added or removed has a
    /// route.
    pub redirect_trailing_slash: bool,
    /// Redirect to the cleaned, case-corrected path when one has a route.
    pub redirect_fixed_path: bool,
    /// Answer "method not allowed" when another method has a route for the
    /// path.
    pub handle_method_not_allowed: bool,
    /// The caller passes the raw, still escaped request path.
    pub use_raw_path: bool,
    /// Percent-decode captured values. Only effective with `use_raw_path`.
    pub unescape_path_values: bool,
    /// Clean the path before looking it up.
    pub remove_extra_slash: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Debug,
            redirect_trailing_slash: true,
            redirect_fixed_path: false,
            handle_method_not_allowed: false,
            use_raw_path: false,
            unescape_path_values: true,
            remove_extra_slash: false,
        }
    }
}

impl RouterConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the logging mode.
    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables trailing-slash redirects.
    #[must_use]
    pub const fn redirect_trailing_slash(mut self, enabled: bool) -> Self {
        self.redirect_trailing_slash = enabled;
        self
    }

    /// Enables or disables fixed-path redirects.
    #[must_use]
    pub const fn redirect_fixed_path(mut self, enabled: bool) -> Self {
        self.redirect_fixed_path = enabled;
        self
    }

    /// Enables or disables "method not allowed" answers.
    #[must_use]
    pub const fn handle_method_not_allowed(mut self, enabled: bool) -> Self {
        self.handle_method_not_allowed = enabled;
        self
    }

    /// Declares that lookups receive the raw, escaped path.
    #[must_use]
    pub const fn use_raw_path(mut self, enabled: bool) -> Self {
        self.use_raw_path = enabled;
        self
    }

    /// Enables or disables percent-decoding of captured values.
    #[must_use]
    pub const fn unescape_path_values(mut self, enabled: bool) -> Self {
        self.unescape_path_values = enabled;
        self
    }

    /// Enables or disables path cleaning before lookup.
    #[must_use]
    pub const fn remove_extra_slash(mut self, enabled: bool) -> Self {
        self.remove_extra_slash = enabled;
        self
    }

    pub(crate) const fn unescape(&self) -> bool {
        self.use_raw_path && self.unescape_path_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("").unwrap(), Mode::Debug);
        assert_eq!("release".parse::<Mode>().unwrap(), Mode::Release);
        assert_eq!(Mode::parse("test").unwrap().to_string(), "test");
        assert_eq!(
            Mode::parse("verbose"),
            Err(RouterError::InvalidMode("verbose".to_string()))
        );
    }

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(config.mode.is_debug());
        assert!(config.redirect_trailing_slash);
        assert!(!config.redirect_fixed_path);
        assert!(!config.handle_method_not_allowed);
        assert!(!config.unescape());
        assert!(config.use_raw_path(true).unescape());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RouterConfig =
            serde_json::from_str(r#"{"mode": "release", "redirect_fixed_path": true}"#).unwrap();
        assert_eq!(config.mode, Mode::Release);
        assert!(config.redirect_fixed_path);
        assert!(config.redirect_trailing_slash);
        assert!(config.unescape_path_values);
    }
}
