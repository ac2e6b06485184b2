//! Glint - progressive enhancement for static marketing pages.
//!
//! A fixed set of independent behaviors (smooth anchors, sticky header, mobile
//! nav, scroll-spy, reveal on scroll, counters, hero parallax and background
//! images) written once against the [`host::Host`] seam and run either in the
//! browser (feature `web`) or headlessly over parsed HTML ([`headless`]).

pub mod behavior;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod config;
pub mod dom;
pub mod headless;
pub mod host;
pub mod logger;
pub mod runtime;
pub mod utils;
#[cfg(feature = "web")]
pub mod web;
