//! Reduced-motion preference.

use std::fmt;

use crate::config::MotionConfig;
use crate::host::{Host, ScrollBehavior};

/// Motion preference, read once at attach and never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Motion {
    reduced: bool,
}

impl Motion {
    pub const fn new(reduced: bool) -> Self {
        Self { reduced }
    }

    /// The config override wins over the media query.
    pub fn detect<H: Host>(host: &H, config: &MotionConfig) -> Self {
        let reduced = config
            .force_reduced
            .unwrap_or_else(|| host.prefers_reduced_motion());
        Self { reduced }
    }

    pub const fn is_reduced(self) -> bool {
        self.reduced
    }

    pub const fn scroll_behavior(self) -> ScrollBehavior {
        if self.reduced {
            ScrollBehavior::Auto
        } else {
            ScrollBehavior::Smooth
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.reduced { "reduced" } else { "full" })
    }
}
