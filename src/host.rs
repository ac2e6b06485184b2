//! The DOM + window seam the behaviors are written against.
//!
//! Two hosts implement it: the headless [`Page`](crate::headless::Page), which
//! drives an in-memory document, and the browser host in `web` (feature `web`).
//! Every operation is infallible: a host that cannot perform one degrades to a
//! no-op, the same way a missing element does.

use std::fmt;

/// `scrollIntoView` behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Jump instantly.
    Auto,
    /// Animate the scroll.
    Smooth,
}

impl ScrollBehavior {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Smooth => "smooth",
        }
    }
}

impl fmt::Display for ScrollBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `document.readyState`, which decides how a host attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Unknown values count as `Interactive`.
    pub fn parse(state: &str) -> Self {
        match state {
            "loading" => Self::Loading,
            "complete" => Self::Complete,
            _ => Self::Interactive,
        }
    }

    /// The DOM is parsed, so behaviors can bind now.
    pub fn is_parsed(self) -> bool {
        self != Self::Loading
    }

    /// Window `load` already fired: a listener added now never runs, so the
    /// host delivers `Load` itself.
    pub fn load_fired(self) -> bool {
        self == Self::Complete
    }
}

/// Access to a document and its window.
///
/// Selectors are plain CSS strings; an invalid selector matches nothing.
pub trait Host {
    /// Element handle. Cheap to clone, compared by identity.
    type Node: Clone + PartialEq + fmt::Debug;

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// Matches strictly inside `scope`.
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;
    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&mut self, node: &Self::Node, name: &str, value: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// `classList.toggle(class, on)`.
    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&mut self, node: &Self::Node, text: &str);
    /// Set one inline style property.
    fn set_style(&mut self, node: &Self::Node, prop: &str, value: &str);
    /// Resolved style value, e.g. `background-image`.
    fn computed_style(&self, node: &Self::Node, prop: &str) -> Option<String>;

    /// Distance from the document top, in CSS pixels.
    fn offset_top(&self, node: &Self::Node) -> f64;
    fn scroll_y(&self) -> f64;
    /// Scroll so `node` aligns with the top of the viewport.
    fn scroll_into_view(&mut self, node: &Self::Node, behavior: ScrollBehavior);
    fn focus(&mut self, node: &Self::Node, prevent_scroll: bool);

    /// `(prefers-reduced-motion: reduce)`.
    fn prefers_reduced_motion(&self) -> bool;
    /// Start loading `url` off-DOM; completion arrives as `Event::ImageLoaded`.
    fn preload_image(&mut self, url: &str);
}
