//! Router settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::MatchStrategy;

/// Settings applied when a [`Router`](crate::Router) is built.
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```
/// use oxide_route::{MatchStrategy, RouterSettings};
///
/// let settings = RouterSettings::from_json(r#"{"base_url": "http://localhost/app/", "strategy": "pattern"}"#).unwrap();
/// assert_eq!(settings.base_url, "http://localhost/app/");
/// assert_eq!(settings.strategy, MatchStrategy::Pattern);
/// assert!(settings.use_di);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Prefix for generated URLs and relative redirect targets; stripped from
    /// incoming URLs.
    pub base_url: String,
    /// Directory holding `<status>.html` error pages.
    pub view_dir: Option<PathBuf>,
    /// Build controllers through the handler factory when one is installed.
    pub use_di: bool,
    /// Matcher used for parameterized routes.
    pub strategy: MatchStrategy,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            view_dir: None,
            use_di: true,
            strategy: MatchStrategy::default(),
        }
    }
}

impl RouterSettings {
    /// Creates default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the error page directory.
    #[must_use]
    pub fn view_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.view_dir = Some(dir.into());
        self
    }

    /// Chooses between factory and default construction of controllers.
    #[must_use]
    pub fn use_di(mut self, enabled: bool) -> Self {
        self.use_di = enabled;
        self
    }

    /// Sets the matching strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    #[test]
    fn test_defaults() {
        let settings = RouterSettings::from_json("{}").unwrap();
        assert_eq!(settings, RouterSettings::default());
        assert_eq!(settings.strategy, MatchStrategy::Positional);
    }

    #[test]
    fn test_builder() {
        let settings = RouterSettings::new()
            .base_url("http://x/")
            .view_dir("views")
            .use_di(false);
        assert_eq!(settings.view_dir, Some(PathBuf::from("views")));
        assert!(!settings.use_di);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            RouterSettings::from_json(r#"{"strategy": "fuzzy"}"#),
            Err(RouterError::InvalidSettings(_))
        ));
    }
}
