//! Sticky header class.

use crate::config::HeaderConfig;
use crate::debug;
use crate::host::Host;
use crate::runtime::{Behavior, Context, Event, Flow};

pub struct Header<H: Host> {
    node: H::Node,
    threshold: f64,
    class: String,
}

impl<H: Host> Header<H> {
    pub fn bind(host: &H, config: &HeaderConfig) -> Option<Self> {
        let Some(node) = host.query(&config.selector) else {
            debug!("header"; "no `{}` element", config.selector);
            return None;
        };
        Some(Self {
            node,
            threshold: config.threshold,
            class: config.class.clone(),
        })
    }

    fn sync(&self, cx: &mut Context<'_, H>) {
        // Strictly past the threshold
        let scrolled = cx.host.scroll_y() > self.threshold;
        cx.host.set_class(&self.node, &self.class, scrolled);
    }
}

impl<H: Host> Behavior<H> for Header<H> {
    fn name(&self) -> &'static str {
        "header"
    }

    fn start(&mut self, cx: &mut Context<'_, H>) {
        self.sync(cx);
    }

    fn handle(&mut self, event: &Event<H::Node>, cx: &mut Context<'_, H>) -> Flow {
        if matches!(event, Event::Scroll) {
            self.sync(cx);
        }
        Flow::Continue
    }
}
