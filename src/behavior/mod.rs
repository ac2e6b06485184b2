//! The behavior units.
//!
//! | Unit       | Reacts to                 | Effect                                  |
//! |------------|---------------------------|-----------------------------------------|
//! | `anchor`   | click                     | scroll to and focus fragment target     |
//! | `header`   | start, scroll             | header class past a scroll offset       |
//! | `nav`      | click, keydown            | open/close menu, ARIA and body lock     |
//! | `spy`      | scroll, load              | active class on the current nav link    |
//! | `reveal`   | intersection (one-shot)   | visible class                           |
//! | `counter`  | intersection, frames      | eased count up to `data-target`         |
//! | `parallax` | scroll, frames            | capped `translateY` on the hero image   |
//! | `backdrop` | start, image load         | background images                       |
//!
//! Units never reference each other. Each one binds only when its elements
//! exist and is skipped otherwise.

mod anchor;
mod backdrop;
mod counter;
pub mod easing;
mod header;
mod motion;
mod nav;
pub mod oneshot;
mod parallax;
mod reveal;
mod spy;

#[cfg(test)]
mod tests;

pub use anchor::Anchor;
pub use backdrop::Backdrop;
pub use counter::{Counter, parse_leading_int};
pub use header::Header;
pub use motion::Motion;
pub use nav::Nav;
pub use parallax::Parallax;
pub use reveal::Reveal;
pub use spy::Spy;

use crate::config::GlintConfig;
use crate::host::Host;
use crate::runtime::Behavior;

/// Unit names in registration order.
pub const NAMES: [&str; 8] = [
    "anchor", "header", "nav", "spy", "reveal", "counter", "parallax", "backdrop",
];

/// Whether the config enables the unit called `name`.
pub fn is_enabled(config: &GlintConfig, name: &str) -> bool {
    match name {
        "anchor" => config.anchor.enable,
        "header" => config.header.enable,
        "nav" => config.nav.enable,
        "spy" => config.spy.enable,
        "reveal" => config.reveal.enable,
        "counter" => config.counter.enable,
        "parallax" => config.parallax.enable,
        "backdrop" => config.backdrop.enable,
        _ => false,
    }
}

/// Bind every enabled unit whose elements exist, in registration order.
pub fn bind_all<H: Host + 'static>(
    host: &H,
    config: &GlintConfig,
    motion: Motion,
) -> Vec<Box<dyn Behavior<H>>> {
    let reduced = motion.is_reduced();
    let mut bound: Vec<Box<dyn Behavior<H>>> = Vec::new();

    if config.anchor.enable
        && let Some(b) = Anchor::bind(host, &config.anchor)
    {
        bound.push(Box::new(b));
    }
    if config.header.enable
        && let Some(b) = Header::bind(host, &config.header)
    {
        bound.push(Box::new(b));
    }
    if config.nav.enable
        && let Some(b) = Nav::bind(host, &config.nav)
    {
        bound.push(Box::new(b));
    }
    if config.spy.enable
        && let Some(b) = Spy::bind(host, &config.spy)
    {
        bound.push(Box::new(b));
    }
    if config.reveal.enable
        && let Some(b) = Reveal::bind(host, &config.reveal)
    {
        bound.push(Box::new(b));
    }
    if config.counter.enable
        && let Some(b) = Counter::bind(host, &config.counter, reduced)
    {
        bound.push(Box::new(b));
    }
    if config.parallax.enable
        && let Some(b) = Parallax::bind(host, &config.parallax, reduced)
    {
        bound.push(Box::new(b));
    }
    if config.backdrop.enable
        && let Some(b) = Backdrop::bind(host, &config.backdrop)
    {
        bound.push(Box::new(b));
    }

    bound
}
