//! Headless page: an in-memory document plus simulated window state.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dom::{Document, DomError, NodeId, Selector};
use crate::host::{Host, ScrollBehavior};

/// Layout box of an element, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub top: f64,
    pub height: f64,
}

impl Geometry {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Visible fraction of this box for a viewport starting at `scroll_y`.
    /// Zero-height boxes are never visible.
    pub fn visible_ratio(&self, scroll_y: f64, viewport: f64) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let top = self.top.max(scroll_y);
        let bottom = (self.top + self.height).min(scroll_y + viewport);
        ((bottom - top).max(0.0) / self.height).min(1.0)
    }
}

/// A `scrollIntoView` call, as seen from outside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub target: String,
    pub behavior: ScrollBehavior,
}

pub const DEFAULT_VIEWPORT: f64 = 800.0;

/// Headless [`Host`] over a parsed [`Document`].
///
/// Layout is not computed: elements have the [`Geometry`] assigned to them
/// (zero otherwise), and computed styles are whatever was declared for them
/// on top of their inline styles.
#[derive(Debug)]
pub struct Page {
    doc: Document,
    viewport: f64,
    reduced_motion: bool,
    scroll_y: f64,
    geometry: FxHashMap<NodeId, Geometry>,
    computed: FxHashMap<NodeId, Vec<(String, String)>>,
    failing_images: Vec<String>,
    focused: Option<NodeId>,
    hash: Option<String>,
    scroll_requests: Vec<ScrollRequest>,
    pending_preloads: Vec<String>,
    preloaded: Vec<String>,
    scroll_pending: bool,
    /// Parsed selectors; `None` caches a parse failure.
    selectors: Mutex<FxHashMap<String, Option<Selector>>>,
}

impl Page {
    pub fn parse(html: &str) -> Result<Self, DomError> {
        Ok(Self::from_document(Document::parse(html)?))
    }

    pub fn from_document(doc: Document) -> Self {
        Self {
            doc,
            viewport: DEFAULT_VIEWPORT,
            reduced_motion: false,
            scroll_y: 0.0,
            geometry: FxHashMap::default(),
            computed: FxHashMap::default(),
            failing_images: Vec::new(),
            focused: None,
            hash: None,
            scroll_requests: Vec::new(),
            pending_preloads: Vec::new(),
            preloaded: Vec::new(),
            scroll_pending: false,
            selectors: Mutex::new(FxHashMap::default()),
        }
    }

    // ========================================================================
    // setup
    // ========================================================================

    pub fn with_viewport(mut self, height: f64) -> Self {
        self.viewport = height.max(0.0);
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Assign `geometry` to every element matching `selector`.
    /// Returns the number of elements matched.
    pub fn set_geometry(&mut self, selector: &str, geometry: Geometry) -> Result<usize, DomError> {
        let nodes = self.doc.query_all(&Selector::parse(selector)?);
        for node in &nodes {
            self.geometry.insert(*node, geometry);
        }
        Ok(nodes.len())
    }

    /// Declare a stylesheet value for every element matching `selector`.
    pub fn set_computed_style(
        &mut self,
        selector: &str,
        prop: &str,
        value: &str,
    ) -> Result<usize, DomError> {
        let nodes = self.doc.query_all(&Selector::parse(selector)?);
        let prop = prop.to_ascii_lowercase();
        for node in &nodes {
            let decls = self.computed.entry(*node).or_default();
            decls.retain(|(p, _)| *p != prop);
            decls.push((prop.clone(), value.to_string()));
        }
        Ok(nodes.len())
    }

    /// Preloads of `url` will never complete.
    pub fn fail_image(&mut self, url: impl Into<String>) {
        self.failing_images.push(url.into());
    }

    // ========================================================================
    // window state
    // ========================================================================

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn to_html(&self) -> String {
        self.doc.to_html()
    }

    pub fn viewport(&self) -> f64 {
        self.viewport
    }

    /// Jump the scroll position; negative positions clamp to 0.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn geometry_of(&self, node: NodeId) -> Geometry {
        self.geometry.get(&node).copied().unwrap_or_default()
    }

    pub fn intersection_ratio(&self, node: NodeId) -> f64 {
        self.geometry_of(node)
            .visible_ratio(self.scroll_y, self.viewport)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Default action of following a `#fragment` link.
    pub fn set_hash(&mut self, hash: impl Into<String>) {
        self.hash = Some(hash.into());
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    pub fn preloaded(&self) -> &[String] {
        &self.preloaded
    }

    /// Whether a `scrollIntoView` moved the page since the last call.
    pub fn take_scroll_pending(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    /// Resolve the preloads started so far.
    ///
    /// Returns the URLs that finished loading; failing URLs are dropped.
    pub fn complete_preloads(&mut self) -> Vec<String> {
        let pending = std::mem::take(&mut self.pending_preloads);
        let loaded: Vec<String> = pending
            .into_iter()
            .filter(|url| !self.failing_images.contains(url))
            .collect();
        self.preloaded.extend(loaded.iter().cloned());
        loaded
    }

    pub fn describe(&self, node: NodeId) -> String {
        self.doc.describe(node)
    }

    /// Parse through the cache; an invalid selector matches nothing.
    fn selector(&self, selector: &str) -> Option<Selector> {
        let mut cache = self.selectors.lock();
        cache
            .entry(selector.to_string())
            .or_insert_with(|| Selector::parse(selector).ok())
            .clone()
    }
}

impl Host for Page {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.doc.query(&self.selector(selector)?)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        match self.selector(selector) {
            Some(sel) => self.doc.query_all(&sel),
            None => Vec::new(),
        }
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        match self.selector(selector) {
            Some(sel) => self.doc.query_within(*scope, &sel),
            None => Vec::new(),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.doc.by_id(id)
    }

    fn body(&self) -> Option<NodeId> {
        self.doc.body()
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.doc.contains(*ancestor, *node)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.doc
            .element(*node)
            .map(|el| el.tag.clone())
            .unwrap_or_default()
    }

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        self.doc.element(*node)?.attr(name).map(str::to_string)
    }

    fn set_attr(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(el) = self.doc.element_mut(*node) {
            el.set_attr(name, value);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.doc
            .element(*node)
            .is_some_and(|el| el.has_class(class))
    }

    fn set_class(&mut self, node: &NodeId, class: &str, on: bool) {
        if let Some(el) = self.doc.element_mut(*node) {
            el.set_class(class, on);
        }
    }

    fn text(&self, node: &NodeId) -> String {
        self.doc.text(*node)
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        self.doc.set_text(*node, text);
    }

    fn set_style(&mut self, node: &NodeId, prop: &str, value: &str) {
        if let Some(el) = self.doc.element_mut(*node) {
            el.set_style(prop, value);
        }
    }

    /// Inline styles win over declared stylesheet values.
    fn computed_style(&self, node: &NodeId, prop: &str) -> Option<String> {
        let el = self.doc.element(*node)?;
        el.style(prop).or_else(|| {
            self.computed.get(node).and_then(|decls| {
                decls
                    .iter()
                    .find(|(p, _)| p.eq_ignore_ascii_case(prop))
                    .map(|(_, v)| v.clone())
            })
        })
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.geometry_of(*node).top
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Jumps straight to the target; the behavior is only recorded.
    fn scroll_into_view(&mut self, node: &NodeId, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest {
            target: self.doc.describe(*node),
            behavior,
        });
        self.set_scroll_y(self.geometry_of(*node).top);
        self.scroll_pending = true;
    }

    fn focus(&mut self, node: &NodeId, _prevent_scroll: bool) {
        if self.doc.element(*node).is_some() {
            self.focused = Some(*node);
        }
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn preload_image(&mut self, url: &str) {
        self.pending_preloads.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<header class="header"></header>
<div class="hero--image" style="color: red"></div>
</body></html>"#;

    #[test]
    fn test_visible_ratio() {
        let g = Geometry::new(1000.0, 100.0);
        assert_eq!(g.visible_ratio(0.0, 800.0), 0.0);
        assert_eq!(g.visible_ratio(250.0, 800.0), 0.5);
        assert_eq!(g.visible_ratio(300.0, 800.0), 1.0);
        assert_eq!(g.visible_ratio(1050.0, 800.0), 0.5);
        assert_eq!(Geometry::new(0.0, 0.0).visible_ratio(0.0, 800.0), 0.0);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let page = Page::parse(PAGE).unwrap();
        assert!(page.query("header:first-child").is_none());
        assert!(page.query_all("a + b").is_empty());
        assert!(page.query(".header").is_some());
    }

    #[test]
    fn test_computed_style_layers() {
        let mut page = Page::parse(PAGE).unwrap();
        let hero = page.query(".hero--image").unwrap();
        assert_eq!(
            page.set_computed_style(".hero--image", "Background-Image", "url(hero.jpg)")
                .unwrap(),
            1
        );
        assert_eq!(
            page.computed_style(&hero, "background-image").as_deref(),
            Some("url(hero.jpg)")
        );

        page.set_style(&hero, "background-image", "none");
        assert_eq!(
            page.computed_style(&hero, "background-image").as_deref(),
            Some("none")
        );
        assert_eq!(page.computed_style(&hero, "color").as_deref(), Some("red"));
    }

    #[test]
    fn test_scroll_into_view_jumps_and_records() {
        let mut page = Page::parse(PAGE).unwrap();
        page.set_geometry(".header", Geometry::new(120.0, 60.0)).unwrap();
        let header = page.query(".header").unwrap();

        page.scroll_into_view(&header, ScrollBehavior::Smooth);
        assert_eq!(page.scroll_y(), 120.0);
        assert!(page.take_scroll_pending());
        assert!(!page.take_scroll_pending());
        assert_eq!(page.scroll_requests()[0].target, "header.header");
    }

    #[test]
    fn test_failing_preloads_never_complete() {
        let mut page = Page::parse(PAGE).unwrap();
        page.fail_image("broken.jpg");
        page.preload_image("hero.jpg");
        page.preload_image("broken.jpg");

        assert_eq!(page.complete_preloads(), vec!["hero.jpg"]);
        assert!(page.complete_preloads().is_empty());
        assert_eq!(page.preloaded(), ["hero.jpg"]);
    }
}
