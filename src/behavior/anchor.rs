//! Smooth scrolling for in-page links.

use percent_encoding::percent_decode_str;

use crate::config::AnchorConfig;
use crate::debug;
use crate::host::Host;
use crate::runtime::{Behavior, Context, Event, Flow};
use crate::utils::html::is_focusable_element;

pub struct Anchor<H: Host> {
    links: Vec<H::Node>,
}

impl<H: Host> Anchor<H> {
    pub fn bind(host: &H, config: &AnchorConfig) -> Option<Self> {
        let links = host.query_all(&config.selector);
        if links.is_empty() {
            debug!("anchor"; "no `{}` links", config.selector);
            return None;
        }
        Some(Self { links })
    }

    /// Scroll to and focus the fragment target of `link`.
    ///
    /// Returns `Continue` when the link has no resolvable fragment so the
    /// default navigation proceeds.
    fn follow(&self, link: &H::Node, cx: &mut Context<'_, H>) -> Flow {
        let Some(href) = cx.host.attr(link, "href") else {
            return Flow::Continue;
        };
        let Some(fragment) = fragment_id(&href) else {
            return Flow::Continue;
        };
        let Some(target) = cx.host.element_by_id(&fragment) else {
            debug!("anchor"; "#{} has no target", fragment);
            return Flow::Continue;
        };

        cx.host.scroll_into_view(&target, cx.motion.scroll_behavior());

        let tag = cx.host.tag_name(&target);
        let has_href = cx.host.attr(&target, "href").is_some();
        if !is_focusable_element(&tag, has_href) && cx.host.attr(&target, "tabindex").is_none() {
            cx.host.set_attr(&target, "tabindex", "-1");
        }
        cx.host.focus(&target, true);

        debug!("anchor"; "jump to #{} ({})", fragment, cx.motion.scroll_behavior());
        Flow::PreventDefault
    }
}

/// Decoded id of a `#fragment` href; `None` for `#` or non-fragment hrefs.
fn fragment_id(href: &str) -> Option<String> {
    let raw = href.strip_prefix('#')?;
    if raw.is_empty() {
        return None;
    }
    Some(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

impl<H: Host> Behavior<H> for Anchor<H> {
    fn name(&self) -> &'static str {
        "anchor"
    }

    fn handle(&mut self, event: &Event<H::Node>, cx: &mut Context<'_, H>) -> Flow {
        let Event::Click { target } = event else {
            return Flow::Continue;
        };
        // Innermost bound link containing the click target
        let link = self
            .links
            .iter()
            .rev()
            .find(|link| cx.host.contains(link, target))
            .cloned();
        match link {
            Some(link) => self.follow(&link, cx),
            None => Flow::Continue,
        }
    }
}
