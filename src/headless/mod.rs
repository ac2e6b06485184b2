//! Headless host: runs the behaviors against parsed HTML.
//!
//! # Module Structure
//!
//! ```text
//! headless/
//! ├── page       # Page: Host over dom::Document with simulated window state
//! ├── runner     # Runner: attach, events, frames, settling
//! ├── session    # Session: scripted setup and steps from TOML
//! └── snapshot   # Snapshot: serializable end state
//! ```
//!
//! # Example
//!
//! ```ignore
//! let page = Page::parse(html)?;
//! let mut runner = Runner::open(page, &GlintConfig::default());
//! runner.scroll(500.0);
//! runner.advance(1000.0);
//! println!("{}", runner.snapshot().to_json()?);
//! ```

mod page;
mod runner;
mod session;
mod snapshot;

pub use page::{DEFAULT_VIEWPORT, Geometry, Page, ScrollRequest};
pub use runner::{FRAME_MS, Runner};
pub use session::{
    GeometryRule, MAX_ADVANCE_MS, MAX_FRAMES, PageOptions, Session, SessionError, Step, StyleRule,
};
pub use snapshot::Snapshot;
