//! `[anchor]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [anchor]
//! enable = true
//! selector = "a[href^=\"#\"]"    # Links handled as in-page jumps
//! ```

use serde::{Deserialize, Serialize};

use super::check_selector;
use crate::config::{ConfigDiagnostics, FieldPath};

/// In-page link scrolling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub enable: bool,
    pub selector: String,
}

impl AnchorConfig {
    pub const SELECTOR: FieldPath = FieldPath::new("anchor.selector");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(diag, Self::SELECTOR, &self.selector);
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            enable: true,
            selector: r##"a[href^="#"]"##.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_anchor_defaults() {
        let config = test_parse_config("");
        assert!(config.anchor.enable);
        assert_eq!(config.anchor.selector, r##"a[href^="#"]"##);
    }

    #[test]
    fn test_anchor_custom_selector() {
        let config = test_parse_config("[anchor]\nselector = \"a.jump\"");
        assert_eq!(config.anchor.selector, "a.jump");
    }
}
