//! `[motion]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [motion]
//! force_reduced = true    # Ignore the media query and always reduce motion
//! ```

use serde::{Deserialize, Serialize};

/// Motion-preference override.
///
/// Unset means the `(prefers-reduced-motion: reduce)` media query decides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_reduced: Option<bool>,
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_motion_defaults_to_media_query() {
        let config = test_parse_config("");
        assert_eq!(config.motion.force_reduced, None);
    }

    #[test]
    fn test_motion_override() {
        let config = test_parse_config("[motion]\nforce_reduced = false");
        assert_eq!(config.motion.force_reduced, Some(false));
    }
}
