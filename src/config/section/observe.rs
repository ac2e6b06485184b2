//! `[reveal]` and `[counter]` section configuration.
//!
//! Both sections configure one-shot intersection behaviors: each matching
//! element triggers once, then stops being observed.
//!
//! # Example
//!
//! ```toml
//! [reveal]
//! selector = ".reveal"
//! threshold = 0.12       # Visible ratio that triggers the reveal
//! class = "is-visible"
//!
//! [counter]
//! selector = ".count"
//! attr = "data-target"   # Integer the counter tweens to
//! threshold = 0.6
//! duration = 1000        # Tween length (ms); 0 with reduced motion
//! parse = "strict"       # strict: skip invalid targets | lenient: treat as 0
//! ```

use serde::{Deserialize, Serialize};

use super::{check_attr, check_class, check_non_negative, check_ratio, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

// ============================================================================
// [reveal]
// ============================================================================

/// Reveal-on-scroll.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub enable: bool,
    pub selector: String,
    pub threshold: f64,
    pub class: String,
}

impl RevealConfig {
    pub const SELECTOR: FieldPath = FieldPath::new("reveal.selector");
    pub const THRESHOLD: FieldPath = FieldPath::new("reveal.threshold");
    pub const CLASS: FieldPath = FieldPath::new("reveal.class");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(diag, Self::SELECTOR, &self.selector);
        check_ratio(diag, Self::THRESHOLD, self.threshold);
        check_class(diag, Self::CLASS, &self.class);
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enable: true,
            selector: ".reveal".into(),
            threshold: 0.12,
            class: "is-visible".into(),
        }
    }
}

// ============================================================================
// [counter]
// ============================================================================

/// How a counter target that is not an integer is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterParse {
    /// Missing or non-numeric targets skip the animation.
    #[default]
    Strict,
    /// Missing or non-numeric targets count to 0.
    Lenient,
}

/// Animated counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub enable: bool,
    pub selector: String,
    pub attr: String,
    pub threshold: f64,
    pub duration: f64,
    pub parse: CounterParse,
}

impl CounterConfig {
    pub const SELECTOR: FieldPath = FieldPath::new("counter.selector");
    pub const ATTR: FieldPath = FieldPath::new("counter.attr");
    pub const THRESHOLD: FieldPath = FieldPath::new("counter.threshold");
    pub const DURATION: FieldPath = FieldPath::new("counter.duration");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(diag, Self::SELECTOR, &self.selector);
        check_attr(diag, Self::ATTR, &self.attr);
        check_ratio(diag, Self::THRESHOLD, self.threshold);
        check_non_negative(diag, Self::DURATION, self.duration);
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            enable: true,
            selector: ".count".into(),
            attr: "data-target".into(),
            threshold: 0.6,
            duration: 1000.0,
            parse: CounterParse::Strict,
        }
    }
}
