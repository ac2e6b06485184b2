//! Scroll-spy: highlights the nav link of the section being read.

use crate::config::SpyConfig;
use crate::debug;
use crate::host::Host;
use crate::runtime::{Behavior, Context, Event, Flow};

pub struct Spy<H: Host> {
    sections: Vec<(H::Node, String)>,
    links: Vec<H::Node>,
    offset: f64,
    class: String,
    current: Option<String>,
}

impl<H: Host> Spy<H> {
    pub fn bind(host: &H, config: &SpyConfig) -> Option<Self> {
        let sections: Vec<_> = host
            .query_all(&config.sections)
            .into_iter()
            .filter_map(|node| {
                let id = host.attr(&node, "id")?;
                Some((node, id))
            })
            .collect();
        if sections.is_empty() {
            debug!("spy"; "no `{}` sections", config.sections);
            return None;
        }

        Some(Self {
            sections,
            links: host.query_all(&config.links),
            offset: config.offset,
            class: config.class.clone(),
            current: None,
        })
    }

    /// Last section whose top is at or above the lookahead line, else the first.
    fn current_section(&self, host: &H) -> &str {
        let from_top = host.scroll_y() + self.offset;
        let mut current = self.sections[0].1.as_str();
        for (node, id) in &self.sections {
            if host.offset_top(node) <= from_top {
                current = id;
            }
        }
        current
    }

    fn update(&mut self, cx: &mut Context<'_, H>) {
        let current = self.current_section(cx.host).to_owned();
        let wanted = format!("#{current}");
        for link in &self.links {
            let active = cx.host.attr(link, "href").as_deref() == Some(wanted.as_str());
            cx.host.set_class(link, &self.class, active);
        }
        if self.current.as_deref() != Some(current.as_str()) {
            debug!("spy"; "current section #{}", current);
            self.current = Some(current);
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl<H: Host> Behavior<H> for Spy<H> {
    fn name(&self) -> &'static str {
        "spy"
    }

    fn handle(&mut self, event: &Event<H::Node>, cx: &mut Context<'_, H>) -> Flow {
        if matches!(event, Event::Scroll | Event::Load) {
            self.update(cx);
        }
        Flow::Continue
    }
}
