//! `[spy]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [spy]
//! sections = "main section[id]"
//! links = ".nav__link"
//! offset = 90          # Lookahead below the scroll position (px)
//! class = "is-active"
//! ```

use serde::{Deserialize, Serialize};

use super::{check_class, check_non_negative, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

/// Scroll-spy link highlighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpyConfig {
    pub enable: bool,
    pub sections: String,
    pub links: String,
    pub offset: f64,
    pub class: String,
}

impl SpyConfig {
    pub const SECTIONS: FieldPath = FieldPath::new("spy.sections");
    pub const LINKS: FieldPath = FieldPath::new("spy.links");
    pub const OFFSET: FieldPath = FieldPath::new("spy.offset");
    pub const CLASS: FieldPath = FieldPath::new("spy.class");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(diag, Self::SECTIONS, &self.sections);
        check_selector(diag, Self::LINKS, &self.links);
        check_non_negative(diag, Self::OFFSET, self.offset);
        check_class(diag, Self::CLASS, &self.class);
    }
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            enable: true,
            sections: "main section[id]".into(),
            links: ".nav__link".into(),
            offset: 90.0,
            class: "is-active".into(),
        }
    }
}
