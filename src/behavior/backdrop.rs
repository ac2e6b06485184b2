//! Background images for the hero and banners.

use crate::config::{BackdropConfig, BackdropStrategy};
use crate::debug;
use crate::host::Host;
use crate::runtime::{Behavior, Context, Event, Flow};
use crate::utils::css::{css_url, strip_css_url};

enum Mode<N> {
    /// Inline styles from data attributes, applied at start.
    Attribute {
        hero: Option<N>,
        hero_attr: String,
        banners: Vec<N>,
        banner_attr: String,
    },
    /// Waiting for the hero's stylesheet image to load.
    Preload {
        hero: N,
        url: Option<String>,
        ready_class: String,
    },
}

pub struct Backdrop<H: Host> {
    mode: Mode<H::Node>,
}

impl<H: Host> Backdrop<H> {
    pub fn bind(host: &H, config: &BackdropConfig) -> Option<Self> {
        let hero = host.query(&config.hero);
        let mode = match config.strategy {
            BackdropStrategy::Attribute => {
                let banners = host.query_all(&config.banners);
                if hero.is_none() && banners.is_empty() {
                    debug!("backdrop"; "no `{}` or `{}` elements", config.hero, config.banners);
                    return None;
                }
                Mode::Attribute {
                    hero,
                    hero_attr: config.hero_attr.clone(),
                    banners,
                    banner_attr: config.banner_attr.clone(),
                }
            }
            BackdropStrategy::Preload => {
                let Some(hero) = hero else {
                    debug!("backdrop"; "no `{}` element", config.hero);
                    return None;
                };
                Mode::Preload {
                    hero,
                    url: None,
                    ready_class: config.ready_class.clone(),
                }
            }
        };
        Some(Self { mode })
    }
}

/// Copy `attr` of `node` into its inline `background-image`.
fn apply_attr<H: Host>(host: &mut H, node: &H::Node, attr: &str) {
    if let Some(url) = host.attr(node, attr)
        && !url.trim().is_empty()
    {
        host.set_style(node, "background-image", &css_url(url.trim()));
    }
}

impl<H: Host> Behavior<H> for Backdrop<H> {
    fn name(&self) -> &'static str {
        "backdrop"
    }

    fn start(&mut self, cx: &mut Context<'_, H>) {
        match &mut self.mode {
            Mode::Attribute {
                hero,
                hero_attr,
                banners,
                banner_attr,
            } => {
                if let Some(hero) = hero {
                    apply_attr(cx.host, hero, hero_attr);
                }
                for banner in banners.iter() {
                    apply_attr(cx.host, banner, banner_attr);
                }
            }
            Mode::Preload { hero, url, .. } => {
                let value = cx
                    .host
                    .computed_style(hero, "background-image")
                    .unwrap_or_default();
                let stripped = strip_css_url(value.trim());
                if stripped.is_empty() || stripped == "none" {
                    debug!("backdrop"; "hero has no background image");
                    return;
                }
                debug!("backdrop"; "preloading {}", stripped);
                cx.host.preload_image(&stripped);
                *url = Some(stripped);
            }
        }
    }

    fn handle(&mut self, event: &Event<H::Node>, cx: &mut Context<'_, H>) -> Flow {
        if let (
            Event::ImageLoaded { url: loaded },
            Mode::Preload {
                hero,
                url,
                ready_class,
            },
        ) = (event, &mut self.mode)
            && url.as_deref() == Some(loaded.as_str())
        {
            cx.host.set_class(hero, ready_class, true);
            *url = None;
            debug!("backdrop"; "hero ready");
        }
        Flow::Continue
    }
}
