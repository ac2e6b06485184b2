//! `[parallax]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [parallax]
//! selector = ".hero__badge-img"
//! factor = 0.04     # Offset per scrolled pixel
//! max = 16          # Offset cap (px)
//! ```

use serde::{Deserialize, Serialize};

use super::{check_non_negative, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

/// Hero parallax.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub enable: bool,
    pub selector: String,
    pub factor: f64,
    pub max: f64,
}

impl ParallaxConfig {
    pub const SELECTOR: FieldPath = FieldPath::new("parallax.selector");
    pub const FACTOR: FieldPath = FieldPath::new("parallax.factor");
    pub const MAX: FieldPath = FieldPath::new("parallax.max");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(diag, Self::SELECTOR, &self.selector);
        check_non_negative(diag, Self::FACTOR, self.factor);
        check_non_negative(diag, Self::MAX, self.max);

        if self.enable && (self.factor == 0.0 || self.max == 0.0) {
            diag.warn(Self::FACTOR, "a zero factor or max keeps the image still");
        }
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            enable: true,
            selector: ".hero__badge-img".into(),
            factor: 0.04,
            max: 16.0,
        }
    }
}
