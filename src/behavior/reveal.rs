//! Reveal-on-scroll.

use super::oneshot::OneShot;
use crate::config::RevealConfig;
use crate::debug;
use crate::host::Host;
use crate::runtime::{Behavior, Context, Entry};

pub struct Reveal<H: Host> {
    shots: OneShot<H::Node>,
    threshold: f64,
    class: String,
}

impl<H: Host> Reveal<H> {
    pub fn bind(host: &H, config: &RevealConfig) -> Option<Self> {
        let nodes = host.query_all(&config.selector);
        if nodes.is_empty() {
            debug!("reveal"; "no `{}` elements", config.selector);
            return None;
        }
        Some(Self {
            shots: OneShot::new(nodes),
            threshold: config.threshold,
            class: config.class.clone(),
        })
    }
}

impl<H: Host> Behavior<H> for Reveal<H> {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn start(&mut self, cx: &mut Context<'_, H>) {
        for node in self.shots.nodes() {
            cx.observe(node.clone(), self.threshold);
        }
    }

    fn on_intersect(&mut self, entry: &Entry<H::Node>, cx: &mut Context<'_, H>) {
        if !entry.is_intersecting || !self.shots.trigger(&entry.target) {
            return;
        }
        cx.host.set_class(&entry.target, &self.class, true);
        if self.shots.detach(&entry.target) {
            cx.unobserve(&entry.target);
        }
        debug!("reveal"; "{} left", self.shots.pending());
    }
}
