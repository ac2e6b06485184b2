//! Hero image parallax, throttled to one pending frame.

use crate::config::ParallaxConfig;
use crate::debug;
use crate::host::Host;
use crate::runtime::{Behavior, Context, Event, Flow};

pub struct Parallax<H: Host> {
    node: H::Node,
    factor: f64,
    max: f64,
    /// A frame is requested and has not run yet.
    ticking: bool,
}

impl<H: Host> Parallax<H> {
    /// Not bound at all under reduced motion.
    pub fn bind(host: &H, config: &ParallaxConfig, reduced: bool) -> Option<Self> {
        if reduced {
            debug!("parallax"; "disabled by reduced motion");
            return None;
        }
        let Some(node) = host.query(&config.selector) else {
            debug!("parallax"; "no `{}` element", config.selector);
            return None;
        };
        Some(Self {
            node,
            factor: config.factor,
            max: config.max,
            ticking: false,
        })
    }

    pub fn offset(&self, scroll_y: f64) -> f64 {
        (scroll_y * self.factor).min(self.max)
    }
}

impl<H: Host> Behavior<H> for Parallax<H> {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn handle(&mut self, event: &Event<H::Node>, cx: &mut Context<'_, H>) -> Flow {
        if matches!(event, Event::Scroll) && !self.ticking {
            self.ticking = true;
            cx.request_frame(0);
        }
        Flow::Continue
    }

    fn on_frame(&mut self, _now: f64, _tag: usize, cx: &mut Context<'_, H>) {
        self.ticking = false;
        let offset = self.offset(cx.host.scroll_y());
        cx.host
            .set_style(&self.node, "transform", &format!("translateY({offset}px)"));
    }
}
