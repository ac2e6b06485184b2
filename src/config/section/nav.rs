//! `[nav]` section configuration.
//!
//! The drawer layout uses the same behavior with another container:
//!
//! ```toml
//! [nav]
//! toggle = ".nav__toggle"
//! container = ".nav__drawer"   # default "#site-nav"
//! links = "a.nav__link"        # Links inside the container that close it
//! open_class = "is-open"       # On the container while open
//! lock_class = "no-scroll"     # On <body> while open
//! ```

use serde::{Deserialize, Serialize};

use super::{check_class, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

/// Mobile navigation toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub enable: bool,
    pub toggle: String,
    pub container: String,
    pub links: String,
    pub open_class: String,
    pub lock_class: String,
}

impl NavConfig {
    pub const TOGGLE: FieldPath = FieldPath::new("nav.toggle");
    pub const CONTAINER: FieldPath = FieldPath::new("nav.container");
    pub const LINKS: FieldPath = FieldPath::new("nav.links");
    pub const OPEN_CLASS: FieldPath = FieldPath::new("nav.open_class");
    pub const LOCK_CLASS: FieldPath = FieldPath::new("nav.lock_class");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(diag, Self::TOGGLE, &self.toggle);
        check_selector(diag, Self::CONTAINER, &self.container);
        check_selector(diag, Self::LINKS, &self.links);
        check_class(diag, Self::OPEN_CLASS, &self.open_class);
        check_class(diag, Self::LOCK_CLASS, &self.lock_class);
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            enable: true,
            toggle: ".nav__toggle".into(),
            container: "#site-nav".into(),
            links: "a.nav__link".into(),
            open_class: "is-open".into(),
            lock_class: "no-scroll".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_nav_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.nav.toggle, ".nav__toggle");
        assert_eq!(config.nav.container, "#site-nav");
        assert_eq!(config.nav.links, "a.nav__link");
    }

    #[test]
    fn test_nav_drawer_variant() {
        let config = test_parse_config("[nav]\ncontainer = \".nav__drawer\"");
        assert_eq!(config.nav.container, ".nav__drawer");
        // Other fields keep their defaults
        assert_eq!(config.nav.open_class, "is-open");
    }
}
