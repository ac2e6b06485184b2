//! Behavior runtime: registration, event dispatch, frames and observers.
//!
//! # Model
//!
//! Single-threaded and callback-driven. A host delivers:
//! - DOM events through [`Enhancer::dispatch`] (all behaviors, registration order)
//! - animation frames through [`Enhancer::frame`] (only the requesting behaviors)
//! - intersection entries through [`Enhancer::intersect`] (only the observing behavior)
//!
//! Each call runs to completion before the next; behaviors never see each other,
//! only the shared document.

mod frames;
mod observer;

pub use frames::FrameQueue;
pub use observer::{Entry, ObserverChange, Observers};

use crate::behavior::{self, Motion};
use crate::config::GlintConfig;
use crate::host::Host;

/// Position of a behavior in the registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(pub(crate) usize);

/// Events a host forwards to every behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<N> {
    /// Document scrolled.
    Scroll,
    /// Window `load`.
    Load,
    /// Click whose target is `target` (the innermost element).
    Click { target: N },
    /// `keydown` with `KeyboardEvent.key`.
    KeyDown { key: String },
    /// An image started with `Host::preload_image` finished loading.
    ImageLoaded { url: String },
}

impl<N> Event<N> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Load => "load",
            Self::Click { .. } => "click",
            Self::KeyDown { .. } => "keydown",
            Self::ImageLoaded { .. } => "image",
        }
    }
}

/// What the host should do with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    PreventDefault,
}

impl Flow {
    /// Once any handler prevents the default, it stays prevented.
    pub fn merge(self, other: Flow) -> Flow {
        if self == Flow::PreventDefault || other == Flow::PreventDefault {
            Flow::PreventDefault
        } else {
            Flow::Continue
        }
    }

    pub fn is_prevented(self) -> bool {
        self == Flow::PreventDefault
    }
}

/// Everything a behavior may touch while handling a callback.
pub struct Context<'a, H: Host> {
    pub host: &'a mut H,
    pub motion: Motion,
    slot: Slot,
    frames: &'a mut FrameQueue,
    observers: &'a mut Observers<H::Node>,
}

impl<H: Host> Context<'_, H> {
    /// `requestAnimationFrame`; `tag` comes back in `Behavior::on_frame`.
    pub fn request_frame(&mut self, tag: usize) {
        self.frames.request(self.slot, tag);
    }

    pub fn observe(&mut self, node: H::Node, threshold: f64) {
        self.observers.observe(self.slot, node, threshold);
    }

    /// Returns whether `node` was observed by this behavior.
    pub fn unobserve(&mut self, node: &H::Node) -> bool {
        self.observers.unobserve(self.slot, node)
    }
}

/// One independent behavior unit.
///
/// All hooks default to no-ops so each unit implements only what it reacts to.
pub trait Behavior<H: Host> {
    fn name(&self) -> &'static str;

    /// Runs once, right after attach (DOM-ready).
    fn start(&mut self, _cx: &mut Context<'_, H>) {}

    fn handle(&mut self, _event: &Event<H::Node>, _cx: &mut Context<'_, H>) -> Flow {
        Flow::Continue
    }

    fn on_frame(&mut self, _now: f64, _tag: usize, _cx: &mut Context<'_, H>) {}

    fn on_intersect(&mut self, _entry: &Entry<H::Node>, _cx: &mut Context<'_, H>) {}
}

/// The attached set of behaviors for one document.
pub struct Enhancer<H: Host> {
    motion: Motion,
    behaviors: Vec<Box<dyn Behavior<H>>>,
    frames: FrameQueue,
    observers: Observers<H::Node>,
}

impl<H: Host + 'static> Enhancer<H> {
    /// Read the motion preference once, bind every behavior whose elements
    /// exist and run their start hooks.
    pub fn attach(host: &mut H, config: &GlintConfig) -> Self {
        let motion = Motion::detect(host, &config.motion);
        let behaviors = behavior::bind_all(host, config, motion);

        crate::debug!("attach"; "motion {}, {} behavior(s) bound", motion, behaviors.len());

        let mut enhancer = Self {
            motion,
            behaviors,
            frames: FrameQueue::new(),
            observers: Observers::new(),
        };
        for index in 0..enhancer.behaviors.len() {
            enhancer.run(host, index, |b, cx| b.start(cx));
        }
        enhancer
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Names of the bound behaviors, in registration order.
    pub fn behavior_names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|b| b.name()).collect()
    }

    /// Deliver a DOM event to every behavior in registration order.
    pub fn dispatch(&mut self, host: &mut H, event: &Event<H::Node>) -> Flow {
        let mut flow = Flow::Continue;
        for index in 0..self.behaviors.len() {
            flow = flow.merge(self.run(host, index, |b, cx| b.handle(event, cx)));
        }
        flow
    }

    /// Run the batch of frame callbacks requested before this call.
    pub fn frame(&mut self, host: &mut H, now: f64) {
        for (slot, tag) in self.frames.take() {
            self.run(host, slot.0, |b, cx| b.on_frame(now, tag, cx));
        }
    }

    /// Deliver intersection entries to the behaviors still observing them.
    pub fn intersect(&mut self, host: &mut H, entries: &[Entry<H::Node>]) {
        for entry in entries {
            // Owners are re-read per entry: an earlier entry may have detached it
            for slot in self.observers.owners(entry) {
                self.run(host, slot.0, |b, cx| b.on_intersect(entry, cx));
            }
        }
    }

    pub fn wants_frame(&self) -> bool {
        self.frames.is_pending()
    }

    pub fn observers(&self) -> &Observers<H::Node> {
        &self.observers
    }

    pub fn observers_mut(&mut self) -> &mut Observers<H::Node> {
        &mut self.observers
    }

    fn run<R>(
        &mut self,
        host: &mut H,
        index: usize,
        f: impl FnOnce(&mut dyn Behavior<H>, &mut Context<'_, H>) -> R,
    ) -> R {
        let mut cx = Context {
            host,
            motion: self.motion,
            slot: Slot(index),
            frames: &mut self.frames,
            observers: &mut self.observers,
        };
        f(self.behaviors[index].as_mut(), &mut cx)
    }
}
