//! Scripted sessions: page setup plus a list of user steps.
//!
//! # Example
//!
//! ```toml
//! [page]
//! viewport = 800
//! reduced_motion = false
//! failing_images = ["/img/missing.jpg"]
//!
//! [[geometry]]
//! selector = "main section"
//! top = 0
//! height = 400
//!
//! [[geometry]]                # later rules override earlier ones
//! selector = "#work"
//! top = 400
//! height = 500
//!
//! [[style]]
//! selector = ".hero--image"
//! property = "background-image"
//! value = 'url("/img/hero.jpg")'
//!
//! [[step]]
//! scroll = 500
//!
//! [[step]]
//! click = 'a[href="#work"]'
//!
//! [[step]]
//! advance = 1000              # ms, in 16ms frames
//! ```
//!
//! Other steps: `frames = 3`, `key = "Escape"`, `load = true`.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::page::{DEFAULT_VIEWPORT, Geometry, Page};
use super::runner::FRAME_MS;

/// Longest `advance` one step may ask for: one hour of simulated time.
pub const MAX_ADVANCE_MS: f64 = 3_600_000.0;

/// Most frames one step may ask for, the same hour at 16 ms per frame.
pub const MAX_FRAMES: u32 = (MAX_ADVANCE_MS / FRAME_MS) as u32;
use crate::dom::DomError;

/// Errors raised while loading or running a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("session file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("`{0}` matches no element")]
    SelectorNotFound(String),

    #[error("invalid geometry for `{selector}`: {reason}")]
    Geometry { selector: String, reason: String },

    #[error("step {index}: {reason}")]
    Step { index: usize, reason: String },
}

/// `[page]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageOptions {
    pub viewport: f64,
    pub reduced_motion: bool,
    pub failing_images: Vec<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            viewport: DEFAULT_VIEWPORT,
            reduced_motion: false,
            failing_images: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryRule {
    pub selector: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleRule {
    pub selector: String,
    pub property: String,
    pub value: String,
}

/// One user or browser action.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Scroll to an absolute position.
    Scroll(f64),
    /// Let time pass, running one frame per 16 ms.
    Advance(f64),
    /// Run exactly this many frames.
    Frames(u32),
    /// Click the first element matching the selector.
    Click(String),
    /// Press a key (`KeyboardEvent.key` name).
    Key(String),
    /// Fire window `load`.
    Load,
}

impl Step {
    /// Parse a `[[step]]` table: exactly one known key.
    fn from_table(index: usize, table: &toml::Table) -> Result<Self, SessionError> {
        let err = |reason: String| SessionError::Step { index, reason };

        let mut entries = table.iter();
        let (Some((key, value)), None) = (entries.next(), entries.next()) else {
            return Err(err(format!(
                "expected exactly one action, found {} keys",
                table.len()
            )));
        };

        let number = || match value {
            toml::Value::Integer(i) => Some(*i as f64),
            toml::Value::Float(f) if f.is_finite() => Some(*f),
            _ => None,
        };

        match key.as_str() {
            "scroll" => number()
                .map(Step::Scroll)
                .ok_or_else(|| err("`scroll` must be a number of pixels".into())),
            "advance" => number()
                .filter(|ms| (0.0..=MAX_ADVANCE_MS).contains(ms))
                .map(Step::Advance)
                .ok_or_else(|| {
                    err(format!("`advance` must be between 0 and {MAX_ADVANCE_MS} ms"))
                }),
            "frames" => value
                .as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n <= MAX_FRAMES)
                .map(Step::Frames)
                .ok_or_else(|| err(format!("`frames` must be an integer between 0 and {MAX_FRAMES}"))),
            "click" => value
                .as_str()
                .map(|s| Step::Click(s.to_string()))
                .ok_or_else(|| err("`click` must be a selector string".into())),
            "key" => value
                .as_str()
                .map(|s| Step::Key(s.to_string()))
                .ok_or_else(|| err("`key` must be a key name".into())),
            "load" => match value.as_bool() {
                Some(true) => Ok(Step::Load),
                _ => Err(err("`load` must be `true`".into())),
            },
            other => Err(err(format!(
                "unknown action `{other}` (expected scroll, advance, frames, click, key or load)"
            ))),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scroll(y) => write!(f, "scroll {y}"),
            Self::Advance(ms) => write!(f, "advance {ms}ms"),
            Self::Frames(n) => write!(f, "frames {n}"),
            Self::Click(selector) => write!(f, "click {selector}"),
            Self::Key(key) => write!(f, "key {key}"),
            Self::Load => f.write_str("load"),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSession {
    page: PageOptions,
    geometry: Vec<GeometryRule>,
    style: Vec<StyleRule>,
    step: Vec<toml::Table>,
}

/// A parsed session file.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub page: PageOptions,
    pub geometry: Vec<GeometryRule>,
    pub styles: Vec<StyleRule>,
    pub steps: Vec<Step>,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| SessionError::Io(path.to_path_buf(), err))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, SessionError> {
        let raw: RawSession = toml::from_str(content)?;
        let steps = raw
            .step
            .iter()
            .enumerate()
            .map(|(i, table)| Step::from_table(i + 1, table))
            .collect::<Result<Vec<_>, _>>()?;

        for rule in &raw.geometry {
            if !rule.top.is_finite() || !rule.height.is_finite() || rule.height < 0.0 {
                return Err(SessionError::Geometry {
                    selector: rule.selector.clone(),
                    reason: format!("top {} / height {}", rule.top, rule.height),
                });
            }
        }

        Ok(Self {
            page: raw.page,
            geometry: raw.geometry,
            styles: raw.style,
            steps,
        })
    }

    /// Build the page for `html` with this session's setup.
    ///
    /// A geometry or style rule that matches nothing is an error: it almost
    /// always means the session was written for other markup.
    pub fn prepare(&self, html: &str) -> Result<Page, SessionError> {
        let mut page = Page::parse(html)?
            .with_viewport(self.page.viewport)
            .with_reduced_motion(self.page.reduced_motion);

        for rule in &self.geometry {
            let matched = page.set_geometry(&rule.selector, Geometry::new(rule.top, rule.height))?;
            if matched == 0 {
                return Err(SessionError::SelectorNotFound(rule.selector.clone()));
            }
        }
        for rule in &self.styles {
            let matched = page.set_computed_style(&rule.selector, &rule.property, &rule.value)?;
            if matched == 0 {
                return Err(SessionError::SelectorNotFound(rule.selector.clone()));
            }
        }
        for url in &self.page.failing_images {
            page.fail_image(url.clone());
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = r##"
[page]
viewport = 600
reduced_motion = true

[[geometry]]
selector = "#work"
top = 400
height = 500

[[step]]
scroll = 500

[[step]]
click = 'a[href="#work"]'

[[step]]
advance = 1000.5

[[step]]
load = true
"##;

    #[test]
    fn test_parse_session() {
        let session = Session::parse(SESSION).unwrap();
        assert_eq!(session.page.viewport, 600.0);
        assert!(session.page.reduced_motion);
        assert_eq!(session.geometry.len(), 1);
        assert_eq!(
            session.steps,
            vec![
                Step::Scroll(500.0),
                Step::Click(r##"a[href="#work"]"##.into()),
                Step::Advance(1000.5),
                Step::Load,
            ]
        );
    }

    #[test]
    fn test_unknown_action_is_error() {
        let err = Session::parse("[[step]]\nhover = \".x\"").unwrap_err();
        assert!(err.to_string().contains("step 1"));
        assert!(err.to_string().contains("hover"));
    }

    #[test]
    fn test_two_actions_in_one_step() {
        let err = Session::parse("[[step]]\nscroll = 1\nkey = \"Escape\"").unwrap_err();
        assert!(matches!(err, SessionError::Step { index: 1, .. }));
    }

    #[test]
    fn test_time_steps_are_bounded() {
        let err = Session::parse("[[step]]\nadvance = 1e12").unwrap_err();
        assert!(matches!(err, SessionError::Step { index: 1, .. }));
        assert!(err.to_string().contains("advance"));

        let err = Session::parse("[[step]]\nframes = 4000000000").unwrap_err();
        assert!(err.to_string().contains("frames"));

        let session = Session::parse("[[step]]\nadvance = 3600000\n[[step]]\nframes = 225000")
            .unwrap();
        assert_eq!(
            session.steps,
            vec![Step::Advance(MAX_ADVANCE_MS), Step::Frames(MAX_FRAMES)]
        );
    }

    #[test]
    fn test_negative_height() {
        let err =
            Session::parse("[[geometry]]\nselector = \"a\"\ntop = 0\nheight = -1").unwrap_err();
        assert!(matches!(err, SessionError::Geometry { .. }));
    }

    #[test]
    fn test_prepare_reports_unmatched_rules() {
        let session = Session::parse("[[geometry]]\nselector = \".nope\"\ntop = 0\nheight = 10")
            .unwrap();
        let err = session.prepare("<body><p>hi</p></body>").unwrap_err();
        assert!(matches!(err, SessionError::SelectorNotFound(s) if s == ".nope"));
    }

    #[test]
    fn test_unknown_page_field() {
        assert!(Session::parse("[page]\nheight = 3").is_err());
    }
}
