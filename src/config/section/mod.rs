//! Configuration section definitions.
//!
//! Each module corresponds to a section in `glint.toml`:
//!
//! | Module     | TOML Section             | Purpose                               |
//! |------------|--------------------------|---------------------------------------|
//! | `motion`   | `[motion]`               | Reduced-motion override               |
//! | `anchor`   | `[anchor]`               | In-page link scrolling                |
//! | `header`   | `[header]`               | Sticky header state                   |
//! | `nav`      | `[nav]`                  | Mobile navigation toggle              |
//! | `spy`      | `[spy]`                  | Scroll-spy link highlighting          |
//! | `observe`  | `[reveal]`, `[counter]`  | One-shot intersection behaviors       |
//! | `parallax` | `[parallax]`             | Hero image parallax                   |
//! | `backdrop` | `[backdrop]`             | Background image injection            |

mod anchor;
mod backdrop;
mod header;
mod motion;
mod nav;
mod observe;
mod parallax;
mod spy;

pub use anchor::AnchorConfig;
pub use backdrop::{BackdropConfig, BackdropStrategy};
pub use header::HeaderConfig;
pub use motion::MotionConfig;
pub use nav::NavConfig;
pub use observe::{CounterConfig, CounterParse, RevealConfig};
pub use parallax::ParallaxConfig;
pub use spy::SpyConfig;

use super::{ConfigDiagnostics, FieldPath};
use crate::dom::Selector;

// ============================================================================
// shared field checks
// ============================================================================

/// Selectors are matched by both hosts, so they must stay within the
/// supported subset.
pub(super) fn check_selector(diag: &mut ConfigDiagnostics, field: FieldPath, value: &str) {
    if let Err(err) = Selector::parse(value) {
        diag.error_with_hint(
            field,
            err.to_string(),
            "supported: tag, #id, .class, [attr], [attr=v|^=|$=|*=|~=], descendant and `>`",
        );
    }
}

/// Intersection thresholds are visibility ratios.
pub(super) fn check_ratio(diag: &mut ConfigDiagnostics, field: FieldPath, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        diag.error_with_hint(
            field,
            format!("must be within [0, 1], got {value}"),
            "observer thresholds are visibility ratios",
        );
    }
}

/// Pixel offsets, durations and factors.
pub(super) fn check_non_negative(diag: &mut ConfigDiagnostics, field: FieldPath, value: f64) {
    if !value.is_finite() {
        diag.error(field, format!("must be finite, got {value}"));
    } else if value < 0.0 {
        diag.error(field, format!("must not be negative, got {value}"));
    }
}

pub(super) fn check_class(diag: &mut ConfigDiagnostics, field: FieldPath, value: &str) {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        diag.error(field, format!("`{value}` is not a single class name"));
    }
}

pub(super) fn check_attr(diag: &mut ConfigDiagnostics, field: FieldPath, value: &str) {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '=' || c == '"') {
        diag.error(field, format!("`{value}` is not an attribute name"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: FieldPath = FieldPath::new("test.field");

    #[test]
    fn test_check_ratio_bounds() {
        let mut diag = ConfigDiagnostics::new();
        check_ratio(&mut diag, FIELD, 0.0);
        check_ratio(&mut diag, FIELD, 1.0);
        assert!(diag.is_empty());

        check_ratio(&mut diag, FIELD, 1.01);
        check_ratio(&mut diag, FIELD, f64::NAN);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_check_non_negative() {
        let mut diag = ConfigDiagnostics::new();
        check_non_negative(&mut diag, FIELD, 0.0);
        assert!(diag.is_empty());

        check_non_negative(&mut diag, FIELD, -1.0);
        check_non_negative(&mut diag, FIELD, f64::INFINITY);
        assert_eq!(diag.len(), 2);
        assert!(diag.errors()[1].message.contains("finite"));
    }

    #[test]
    fn test_check_selector_reports_reason() {
        let mut diag = ConfigDiagnostics::new();
        check_selector(&mut diag, FIELD, "main section[id]");
        assert!(diag.is_empty());

        check_selector(&mut diag, FIELD, "a:hover");
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].hint.is_some());
    }

    #[test]
    fn test_check_class_and_attr() {
        let mut diag = ConfigDiagnostics::new();
        check_class(&mut diag, FIELD, "is-open");
        check_attr(&mut diag, FIELD, "data-hero");
        assert!(diag.is_empty());

        check_class(&mut diag, FIELD, "is open");
        check_attr(&mut diag, FIELD, "");
        assert_eq!(diag.len(), 2);
    }
}
