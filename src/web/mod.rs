//! Browser binding (feature `web`).
//!
//! [`start`] is exported to JavaScript. It attaches the behaviors to the live
//! document and wires the browser callbacks into the [`Enhancer`]:
//!
//! | Browser source                   | Enhancer call          |
//! |----------------------------------|------------------------|
//! | window `scroll` / `load`         | `dispatch`             |
//! | attach after `load` fired        | `dispatch(Load)`       |
//! | document `click` / `keydown`     | `dispatch`             |
//! | `requestAnimationFrame`          | `frame`                |
//! | one `IntersectionObserver` per threshold | `intersect`    |
//! | `Image.onload`                   | `dispatch(ImageLoaded)`|
//!
//! All listeners live as long as the page, so their closures are leaked.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, FocusOptions, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::config::GlintConfig;
use crate::host::{Host, ReadyState, ScrollBehavior};
use crate::runtime::{Enhancer, Entry, Event, ObserverChange};
use crate::{debug, log, logger};

// ============================================================================
// Host
// ============================================================================

/// [`Host`] over the live DOM.
pub struct BrowserHost {
    window: Window,
    document: Document,
    /// Image URLs waiting for an off-DOM `Image`.
    preloads: Vec<String>,
}

impl BrowserHost {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            preloads: Vec::new(),
        }
    }

    fn take_preloads(&mut self) -> Vec<String> {
        std::mem::take(&mut self.preloads)
    }
}

fn collect(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Host for BrowserHost {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        collect(self.document.query_selector_all(selector))
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        collect(scope.query_selector_all(selector))
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&mut self, node: &Element, name: &str, value: &str) {
        node.set_attribute(name, value).ok();
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&mut self, node: &Element, class: &str, on: bool) {
        node.class_list().toggle_with_force(class, on).ok();
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&mut self, node: &Element, prop: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            el.style().set_property(prop, value).ok();
        }
    }

    fn computed_style(&self, node: &Element, prop: &str) -> Option<String> {
        let style = self.window.get_computed_style(node).ok().flatten()?;
        style.get_property_value(prop).ok()
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top() + self.scroll_y()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_into_view(&mut self, node: &Element, behavior: ScrollBehavior) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn focus(&mut self, node: &Element, prevent_scroll: bool) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let options = FocusOptions::new();
            options.set_prevent_scroll(prevent_scroll);
            el.focus_with_options(&options).ok();
        }
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn preload_image(&mut self, url: &str) {
        self.preloads.push(url.to_string());
    }
}

// ============================================================================
// App
// ============================================================================

struct App {
    host: BrowserHost,
    enhancer: Enhancer<BrowserHost>,
    /// Native observers keyed by threshold bits.
    observers: FxHashMap<u64, IntersectionObserver>,
    frame_scheduled: bool,
}

type Shared = Rc<RefCell<App>>;

/// Attach the behaviors to the current document.
///
/// `config` is the JSON form of `glint.toml`; omit it for the defaults.
/// `verbose` turns on debug logging to the console. When the document is still
/// loading, attaching waits for `DOMContentLoaded`.
#[wasm_bindgen]
pub fn start(config: Option<String>, verbose: Option<bool>) -> Result<(), JsValue> {
    logger::set_verbose(verbose.unwrap_or(false));
    let config = match config {
        Some(json) => {
            GlintConfig::from_json(&json).map_err(|err| JsValue::from_str(&err.to_string()))?
        }
        None => GlintConfig::default(),
    };
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if !ReadyState::parse(&document.ready_state()).is_parsed() {
        let ready = Closure::once(move || {
            if let Err(err) = attach(window, config) {
                log!("error"; "attach failed: {:?}", err);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            ready.as_ref().unchecked_ref(),
        )?;
        ready.forget();
        return Ok(());
    }
    attach(window, config)
}

fn attach(window: Window, config: GlintConfig) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let mut host = BrowserHost::new(window.clone(), document.clone());
    let enhancer = Enhancer::attach(&mut host, &config);
    log!("glint"; "{} behavior(s) attached", enhancer.behavior_names().len());

    let app: Shared = Rc::new(RefCell::new(App {
        host,
        enhancer,
        observers: FxHashMap::default(),
        frame_scheduled: false,
    }));

    listen(&window, "scroll", &app, |_| Some(Event::Scroll))?;
    listen(&window, "load", &app, |_| Some(Event::Load))?;
    listen(&document, "click", &app, |event| {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        Some(Event::Click { target })
    })?;
    listen(&document, "keydown", &app, |event| {
        let key = event.dyn_ref::<KeyboardEvent>()?.key();
        Some(Event::KeyDown { key })
    })?;

    if ReadyState::parse(&document.ready_state()).load_fired() {
        debug!("glint"; "load already fired, delivering it now");
        let mut guard = app.borrow_mut();
        let App { host, enhancer, .. } = &mut *guard;
        enhancer.dispatch(host, &Event::Load);
    }
    settle(&app);
    Ok(())
}

/// Forward one DOM event type to every behavior.
fn listen(
    target: &web_sys::EventTarget,
    kind: &str,
    app: &Shared,
    convert: impl Fn(&web_sys::Event) -> Option<Event<Element>> + 'static,
) -> Result<(), JsValue> {
    let app = app.clone();
    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let Some(converted) = convert(&event) else {
            return;
        };
        let flow = {
            let mut guard = app.borrow_mut();
            let App { host, enhancer, .. } = &mut *guard;
            enhancer.dispatch(host, &converted)
        };
        if flow.is_prevented() {
            event.prevent_default();
        }
        settle(&app);
    });
    target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

/// Bring the browser in line with what the last callback asked for:
/// observer registrations, the next animation frame and image preloads.
fn settle(app: &Shared) {
    let (changes, preloads, wants_frame) = {
        let mut guard = app.borrow_mut();
        let App { host, enhancer, .. } = &mut *guard;
        (
            enhancer.observers_mut().take_changes(),
            host.take_preloads(),
            enhancer.wants_frame(),
        )
    };

    for change in changes {
        if let Err(err) = apply_change(app, change) {
            debug!("observe"; "failed: {:?}", err);
        }
    }
    for url in preloads {
        if let Err(err) = preload(app, url) {
            debug!("preload"; "failed: {:?}", err);
        }
    }
    if wants_frame && let Err(err) = schedule_frame(app) {
        debug!("frame"; "failed: {:?}", err);
    }
}

fn apply_change(app: &Shared, change: ObserverChange<Element>) -> Result<(), JsValue> {
    match change {
        ObserverChange::Observe { node, threshold } => {
            let existing = app.borrow().observers.get(&threshold.to_bits()).cloned();
            let observer = match existing {
                Some(observer) => observer,
                None => {
                    let observer = new_observer(app, threshold)?;
                    app.borrow_mut()
                        .observers
                        .insert(threshold.to_bits(), observer.clone());
                    observer
                }
            };
            observer.observe(&node);
        }
        ObserverChange::Unobserve { node, threshold } => {
            if let Some(observer) = app.borrow().observers.get(&threshold.to_bits()) {
                observer.unobserve(&node);
            }
        }
    }
    Ok(())
}

fn new_observer(app: &Shared, threshold: f64) -> Result<IntersectionObserver, JsValue> {
    let shared = app.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |records: js_sys::Array| {
        let entries: Vec<Entry<Element>> = records
            .iter()
            .filter_map(|record| record.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|record| Entry {
                target: record.target(),
                threshold,
                ratio: record.intersection_ratio(),
                is_intersecting: record.is_intersecting(),
            })
            .collect();
        {
            let mut guard = shared.borrow_mut();
            let App { host, enhancer, .. } = &mut *guard;
            enhancer.intersect(host, &entries);
        }
        settle(&shared);
    });

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

fn schedule_frame(app: &Shared) -> Result<(), JsValue> {
    if app.borrow().frame_scheduled {
        return Ok(());
    }
    let window = app.borrow().host.window.clone();

    let shared = app.clone();
    let callback = Closure::once(move |now: f64| {
        {
            let mut guard = shared.borrow_mut();
            guard.frame_scheduled = false;
            let App { host, enhancer, .. } = &mut *guard;
            enhancer.frame(host, now);
        }
        settle(&shared);
    });
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    callback.forget();
    app.borrow_mut().frame_scheduled = true;
    Ok(())
}

fn preload(app: &Shared, url: String) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;

    let shared = app.clone();
    let loaded = url.clone();
    let onload = Closure::once(move || {
        {
            let mut guard = shared.borrow_mut();
            let App { host, enhancer, .. } = &mut *guard;
            enhancer.dispatch(host, &Event::ImageLoaded { url: loaded });
        }
        settle(&shared);
    });
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    image.set_src(&url);
    Ok(())
}
