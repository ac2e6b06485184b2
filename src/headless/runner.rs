//! Drives an [`Enhancer`] over a [`Page`] the way a browser would.
//!
//! Every action runs to completion, then the runner settles the page: scroll
//! events caused by `scrollIntoView` are delivered and intersection changes
//! are reported, until nothing changes anymore.

use super::page::Page;
use super::session::{SessionError, Step};
use super::snapshot::Snapshot;
use crate::config::GlintConfig;
use crate::debug;
use crate::dom::NodeId;
use crate::host::Host;
use crate::runtime::{Enhancer, Event, Flow};

/// Simulated frame interval.
pub const FRAME_MS: f64 = 16.0;

/// Settle rounds before giving up on a page that keeps changing.
const SETTLE_LIMIT: usize = 64;

pub struct Runner {
    page: Page,
    enhancer: Enhancer<Page>,
    now: f64,
}

impl Runner {
    /// Attach to `page` (DOM-ready) and deliver the initial intersections.
    pub fn open(mut page: Page, config: &GlintConfig) -> Self {
        let enhancer = Enhancer::attach(&mut page, config);
        let mut runner = Self {
            page,
            enhancer,
            now: 0.0,
        };
        runner.settle();
        runner
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn enhancer(&self) -> &Enhancer<Page> {
        &self.enhancer
    }

    /// Milliseconds of simulated time since `open`.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn load(&mut self) {
        self.dispatch(Event::Load);
    }

    pub fn scroll(&mut self, y: f64) {
        self.page.set_scroll_y(y);
        self.dispatch(Event::Scroll);
    }

    /// One animation frame: finished image loads first, then the frame batch.
    pub fn frame(&mut self) {
        self.now += FRAME_MS;
        for url in self.page.complete_preloads() {
            self.enhancer
                .dispatch(&mut self.page, &Event::ImageLoaded { url });
        }
        self.enhancer.frame(&mut self.page, self.now);
        self.settle();
    }

    pub fn frames(&mut self, count: u32) {
        for _ in 0..count {
            self.frame();
        }
    }

    /// Let `ms` pass, one frame per started [`FRAME_MS`].
    pub fn advance(&mut self, ms: f64) {
        let count = (ms.max(0.0) / FRAME_MS).ceil() as u32;
        self.frames(count);
    }

    /// Run frames while any are requested, at most `limit`.
    /// Returns the number of frames run.
    pub fn run_idle(&mut self, limit: u32) -> u32 {
        let mut ran = 0;
        while ran < limit && self.enhancer.wants_frame() {
            self.frame();
            ran += 1;
        }
        ran
    }

    /// Click the first element matching `selector`.
    ///
    /// When no behavior prevents it, a fragment link's default action
    /// updates the location hash.
    pub fn click(&mut self, selector: &str) -> Result<Flow, SessionError> {
        let target = self
            .page
            .query(selector)
            .ok_or_else(|| SessionError::SelectorNotFound(selector.to_string()))?;

        let flow = self.dispatch(Event::Click { target });
        if !flow.is_prevented()
            && let Some(href) = self.link_href(target)
            && href.starts_with('#')
        {
            debug!("runner"; "default navigation to {}", href);
            self.page.set_hash(href);
        }
        Ok(flow)
    }

    pub fn key(&mut self, key: &str) -> Flow {
        self.dispatch(Event::KeyDown {
            key: key.to_string(),
        })
    }

    pub fn step(&mut self, step: &Step) -> Result<(), SessionError> {
        match step {
            Step::Scroll(y) => self.scroll(*y),
            Step::Advance(ms) => self.advance(*ms),
            Step::Frames(count) => self.frames(*count),
            Step::Click(selector) => {
                self.click(selector)?;
            }
            Step::Key(key) => {
                self.key(key);
            }
            Step::Load => self.load(),
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// `href` of the nearest `<a>` at or above `node`.
    fn link_href(&self, node: NodeId) -> Option<String> {
        let doc = self.page.document();
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(el) = doc.element(id)
                && el.tag == "a"
            {
                return el.attr("href").map(str::to_string);
            }
            current = doc.parent_element(id);
        }
        None
    }

    fn dispatch(&mut self, event: Event<NodeId>) -> Flow {
        let flow = self.enhancer.dispatch(&mut self.page, &event);
        self.settle();
        flow
    }

    fn settle(&mut self) {
        for _ in 0..SETTLE_LIMIT {
            let mut changed = false;

            if self.page.take_scroll_pending() {
                self.enhancer.dispatch(&mut self.page, &Event::Scroll);
                changed = true;
            }

            let page = &self.page;
            let entries = self
                .enhancer
                .observers_mut()
                .evaluate(|node| page.intersection_ratio(*node));
            if !entries.is_empty() {
                self.enhancer.intersect(&mut self.page, &entries);
                changed = true;
            }

            if !changed {
                return;
            }
        }
        debug!("runner"; "page still changing after {} rounds", SETTLE_LIMIT);
    }
}
