//! Arena DOM used by the headless page host.
//!
//! # Module Structure
//!
//! ```text
//! dom/
//! ├── tree       # Document arena: nodes, attributes, classes, text
//! ├── parse      # HTML -> Document via `tl`
//! ├── selector   # CSS selector subset (compound + descendant/child)
//! └── serialize  # Document -> HTML
//! ```
//!
//! Supported selectors cover what the behaviors bind to:
//! `.header`, `#site-nav`, `a.nav__link`, `main section[id]`, `a[href^="#"]`,
//! `.card__banner[data-banner]`, and comma-separated lists of those.

mod parse;
mod selector;
mod serialize;
mod tree;

pub use selector::{Selector, SelectorError};
pub use tree::{Document, Element, NodeId};

use thiserror::Error;

/// Errors raised while building or querying a document.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}
