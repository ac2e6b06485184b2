//! `[header]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [header]
//! enable = true
//! selector = ".header"
//! threshold = 8         # Scroll offset (px) the page must exceed
//! class = "is-scrolled"
//! ```

use serde::{Deserialize, Serialize};

use super::{check_class, check_non_negative, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

/// Sticky header state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub enable: bool,
    pub selector: String,
    /// Strict lower bound: the class applies once `scrollY > threshold`.
    pub threshold: f64,
    pub class: String,
}

impl HeaderConfig {
    pub const SELECTOR: FieldPath = FieldPath::new("header.selector");
    pub const THRESHOLD: FieldPath = FieldPath::new("header.threshold");
    pub const CLASS: FieldPath = FieldPath::new("header.class");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(diag, Self::SELECTOR, &self.selector);
        check_non_negative(diag, Self::THRESHOLD, self.threshold);
        check_class(diag, Self::CLASS, &self.class);
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            enable: true,
            selector: ".header".into(),
            threshold: 8.0,
            class: "is-scrolled".into(),
        }
    }
}
