//! Behavior configuration for `glint.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # One file per behavior section
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Upward config search
//! └── mod.rs         # GlintConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[motion]`    | Reduced-motion override                          |
//! | `[anchor]`    | Smooth in-page link scrolling                    |
//! | `[header]`    | Sticky header class past a scroll offset         |
//! | `[nav]`       | Mobile navigation toggle (list or drawer)        |
//! | `[spy]`       | Active nav link for the current section          |
//! | `[reveal]`    | One-shot reveal when an element becomes visible  |
//! | `[counter]`   | One-shot numeric tween                           |
//! | `[parallax]`  | Hero image offset on scroll                      |
//! | `[backdrop]`  | Background images from attributes or preload     |
//!
//! Every field has a default, so an empty or missing file configures the
//! stock marketing-site markup.

pub mod section;
pub mod types;
mod util;

pub use section::{
    AnchorConfig, BackdropConfig, BackdropStrategy, CounterConfig, CounterParse, HeaderConfig,
    MotionConfig, NavConfig, ParallaxConfig, RevealConfig, SpyConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{debug, log};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `glint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlintConfig {
    /// Where the config was loaded from; `None` for defaults (internal use only).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    pub motion: MotionConfig,
    pub anchor: AnchorConfig,
    pub header: HeaderConfig,
    pub nav: NavConfig,
    pub spy: SpyConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub parallax: ParallaxConfig,
    pub backdrop: BackdropConfig,
}

impl GlintConfig {
    /// Search upward from the cwd for `config_name` and load it.
    ///
    /// A missing file is not an error: every behavior has defaults.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        match find_config_file(config_name) {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("config"; "no {} found, using defaults", config_name.display());
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a config file, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.validate()?;
        config.config_path = Some(path.to_path_buf());
        debug!("config"; "loaded {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string, without validation.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse and validate the JSON form the browser build receives inline.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML, e.g. for `glint init`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Check every section; all problems are reported together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.anchor.validate(&mut diag);
        self.header.validate(&mut diag);
        self.nav.validate(&mut diag);
        self.spy.validate(&mut diag);
        self.reveal.validate(&mut diag);
        self.counter.validate(&mut diag);
        self.parallax.validate(&mut diag);
        self.backdrop.validate(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

#[cfg(test)]
pub fn test_parse_config(content: &str) -> GlintConfig {
    let (parsed, ignored) = GlintConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
