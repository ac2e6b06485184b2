//! Animated counters.
//!
//! A counter triggers once, when it first becomes visible enough. Its target is
//! read at that moment, then it tweens from 0 one frame at a time.

use super::easing::{ease_in_out_quad, progress, round_half_up};
use super::oneshot::OneShot;
use crate::config::{CounterConfig, CounterParse};
use crate::debug;
use crate::host::Host;
use crate::runtime::{Behavior, Context, Entry};

struct Tween<N> {
    node: N,
    target: f64,
    /// Timestamp of the first frame; the tween starts there.
    start: Option<f64>,
}

pub struct Counter<H: Host> {
    shots: OneShot<H::Node>,
    attr: String,
    threshold: f64,
    duration: f64,
    parse: CounterParse,
    /// Indexed by frame tag; finished tweens leave `None`.
    tweens: Vec<Option<Tween<H::Node>>>,
}

impl<H: Host> Counter<H> {
    pub fn bind(host: &H, config: &CounterConfig, reduced: bool) -> Option<Self> {
        let nodes = host.query_all(&config.selector);
        if nodes.is_empty() {
            debug!("counter"; "no `{}` elements", config.selector);
            return None;
        }
        Some(Self {
            shots: OneShot::new(nodes),
            attr: config.attr.clone(),
            threshold: config.threshold,
            duration: if reduced { 0.0 } else { config.duration },
            parse: config.parse,
            tweens: Vec::new(),
        })
    }

    fn target_of(&self, raw: Option<&str>) -> Option<f64> {
        let parsed = raw.and_then(parse_leading_int);
        match self.parse {
            CounterParse::Strict => parsed,
            CounterParse::Lenient => Some(parsed.unwrap_or(0.0)),
        }
    }

    /// Tweens still running.
    pub fn running(&self) -> usize {
        self.tweens.iter().flatten().count()
    }
}

/// Leading-integer parse: optional whitespace and sign, then base-10 digits.
/// Trailing garbage is ignored. No digits at all, or more than an `f64` can
/// hold, is `None`; large integers lose precision like `parseInt`.
pub fn parse_leading_int(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: f64 = rest[..end].parse().ok()?;
    if !magnitude.is_finite() {
        return None;
    }
    // `-0` displays as `0`
    Some(if negative { -magnitude + 0.0 } else { magnitude })
}

impl<H: Host> Behavior<H> for Counter<H> {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn start(&mut self, cx: &mut Context<'_, H>) {
        for node in self.shots.nodes() {
            cx.observe(node.clone(), self.threshold);
        }
    }

    fn on_intersect(&mut self, entry: &Entry<H::Node>, cx: &mut Context<'_, H>) {
        let node = &entry.target;
        if !entry.is_intersecting || !self.shots.trigger(node) {
            return;
        }
        if self.shots.detach(node) {
            cx.unobserve(node);
        }

        let raw = cx.host.attr(node, &self.attr);
        let Some(target) = self.target_of(raw.as_deref()) else {
            debug!("counter"; "skipping, {}={:?} is not an integer", self.attr, raw);
            return;
        };

        let tag = self.tweens.len();
        self.tweens.push(Some(Tween {
            node: node.clone(),
            target,
            start: None,
        }));
        cx.request_frame(tag);
        debug!("counter"; "counting to {} over {}ms", target, self.duration);
    }

    fn on_frame(&mut self, now: f64, tag: usize, cx: &mut Context<'_, H>) {
        let Some(slot) = self.tweens.get_mut(tag) else {
            return;
        };
        let Some(tween) = slot.as_mut() else {
            return;
        };

        let start = *tween.start.get_or_insert(now);
        let p = progress(now - start, self.duration);
        if p < 1.0 {
            let value = round_half_up(tween.target * ease_in_out_quad(p));
            cx.host.set_text(&tween.node, &value.to_string());
            cx.request_frame(tag);
        } else {
            cx.host.set_text(&tween.node, &tween.target.to_string());
            *slot = None;
        }
    }
}
