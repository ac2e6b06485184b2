//! Mobile navigation toggle.
//!
//! The open state is mirrored into three places that always agree: the
//! container's open class, the toggle's `aria-expanded` and the body lock class.

use crate::config::NavConfig;
use crate::debug;
use crate::host::Host;
use crate::runtime::{Behavior, Context, Event, Flow};

pub struct Nav<H: Host> {
    toggle: H::Node,
    container: H::Node,
    links: Vec<H::Node>,
    open_class: String,
    lock_class: String,
    open: bool,
}

impl<H: Host> Nav<H> {
    pub fn bind(host: &H, config: &NavConfig) -> Option<Self> {
        let (Some(toggle), Some(container)) =
            (host.query(&config.toggle), host.query(&config.container))
        else {
            debug!("nav"; "needs both `{}` and `{}`", config.toggle, config.container);
            return None;
        };
        let links = host.query_within(&container, &config.links);
        let open = host.has_class(&container, &config.open_class);

        Some(Self {
            toggle,
            container,
            links,
            open_class: config.open_class.clone(),
            lock_class: config.lock_class.clone(),
            open,
        })
    }

    fn set_open(&mut self, open: bool, cx: &mut Context<'_, H>) {
        self.open = open;
        cx.host.set_class(&self.container, &self.open_class, open);
        cx.host
            .set_attr(&self.toggle, "aria-expanded", if open { "true" } else { "false" });
        if let Some(body) = cx.host.body() {
            cx.host.set_class(&body, &self.lock_class, open);
        }
        debug!("nav"; "menu {}", if open { "opened" } else { "closed" });
    }
}

impl<H: Host> Behavior<H> for Nav<H> {
    fn name(&self) -> &'static str {
        "nav"
    }

    /// Markup may ship with the menu open; make the other facets agree.
    fn start(&mut self, cx: &mut Context<'_, H>) {
        self.set_open(self.open, cx);
    }

    fn handle(&mut self, event: &Event<H::Node>, cx: &mut Context<'_, H>) -> Flow {
        match event {
            Event::Click { target } if cx.host.contains(&self.toggle, target) => {
                self.set_open(!self.open, cx);
            }
            Event::Click { target } => {
                if self.links.iter().any(|link| cx.host.contains(link, target)) {
                    self.set_open(false, cx);
                }
            }
            Event::KeyDown { key } if key == "Escape" && self.open => {
                self.set_open(false, cx);
                let toggle = self.toggle.clone();
                cx.host.focus(&toggle, false);
            }
            _ => {}
        }
        Flow::Continue
    }
}
