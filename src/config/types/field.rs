//! Dotted config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// Path of a config field as written in `glint.toml`, e.g. `counter.threshold`.
///
/// Each section declares its paths as constants so diagnostics never drift
/// from the field names:
///
/// ```ignore
/// impl HeaderConfig {
///     pub const THRESHOLD: FieldPath = FieldPath::new("header.threshold");
/// }
///
/// diag.error(HeaderConfig::THRESHOLD, "must be finite");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Section part of the path (`counter` for `counter.threshold`).
    pub fn section(&self) -> &'static str {
        self.0.split('.').next().unwrap_or(self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section() {
        assert_eq!(FieldPath::new("counter.threshold").section(), "counter");
        assert_eq!(FieldPath::new("motion").section(), "motion");
    }
}
