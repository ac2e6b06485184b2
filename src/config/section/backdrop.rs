//! `[backdrop]` section configuration.
//!
//! Background images come either from data attributes written into inline
//! styles, or from the stylesheet with a preload that marks the hero ready.
//!
//! # Example
//!
//! ```toml
//! [backdrop]
//! strategy = "attribute"      # attribute | preload
//! hero = ".hero--image"
//! hero_attr = "data-hero"
//! banners = ".card__banner"
//! banner_attr = "data-banner"
//! ready_class = "ready"       # preload only
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{check_attr, check_class, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackdropStrategy {
    /// Copy `hero_attr` / `banner_attr` into inline `background-image`.
    #[default]
    Attribute,
    /// Preload the hero's computed `background-image`, then add `ready_class`.
    Preload,
}

impl fmt::Display for BackdropStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attribute => "attribute",
            Self::Preload => "preload",
        })
    }
}

/// Background image injection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub enable: bool,
    pub strategy: BackdropStrategy,
    pub hero: String,
    pub hero_attr: String,
    pub banners: String,
    pub banner_attr: String,
    pub ready_class: String,
}

impl BackdropConfig {
    pub const HERO: FieldPath = FieldPath::new("backdrop.hero");
    pub const HERO_ATTR: FieldPath = FieldPath::new("backdrop.hero_attr");
    pub const BANNERS: FieldPath = FieldPath::new("backdrop.banners");
    pub const BANNER_ATTR: FieldPath = FieldPath::new("backdrop.banner_attr");
    pub const READY_CLASS: FieldPath = FieldPath::new("backdrop.ready_class");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(diag, Self::HERO, &self.hero);
        check_attr(diag, Self::HERO_ATTR, &self.hero_attr);
        check_selector(diag, Self::BANNERS, &self.banners);
        check_attr(diag, Self::BANNER_ATTR, &self.banner_attr);
        check_class(diag, Self::READY_CLASS, &self.ready_class);
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            enable: true,
            strategy: BackdropStrategy::Attribute,
            hero: ".hero--image".into(),
            hero_attr: "data-hero".into(),
            banners: ".card__banner".into(),
            banner_attr: "data-banner".into(),
            ready_class: "ready".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_backdrop_defaults_to_attribute() {
        let config = test_parse_config("");
        assert_eq!(config.backdrop.strategy, BackdropStrategy::Attribute);
        assert_eq!(config.backdrop.hero_attr, "data-hero");
        assert_eq!(config.backdrop.banner_attr, "data-banner");
    }

    #[test]
    fn test_backdrop_preload() {
        let config = test_parse_config("[backdrop]\nstrategy = \"preload\"\nready_class = \"loaded\"");
        assert_eq!(config.backdrop.strategy, BackdropStrategy::Preload);
        assert_eq!(config.backdrop.ready_class, "loaded");
        assert_eq!(config.backdrop.strategy.to_string(), "preload");
    }
}
