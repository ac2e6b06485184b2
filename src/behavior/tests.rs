//! Behavior tests against real markup, driven through the headless runner.

use crate::config::{BackdropStrategy, CounterParse, GlintConfig};
use crate::headless::{Geometry, Page, Runner};
use crate::host::{Host, ScrollBehavior};
use crate::runtime::Flow;

const SITE: &str = r##"<!doctype html>
<html>
<head><title>Studio</title></head>
<body>
<header class="header">
  <a class="brand" href="#intro">Studio</a>
  <button class="nav__toggle" aria-expanded="false"><span>Menu</span></button>
  <nav id="site-nav">
    <a class="nav__link" href="#intro">Intro</a>
    <a class="nav__link" href="#work">Work</a>
    <a class="nav__link" href="#contact"><span class="label">Contact</span></a>
  </nav>
</header>
<div class="hero hero--image" data-hero="/img/hero.jpg">
  <img class="hero__badge-img" src="/img/badge.png" alt="">
</div>
<main>
  <section id="intro">
    <a class="lost" href="#missing">Nowhere</a>
    <a class="top" href="#">Top</a>
    <a class="cta-link" href="#cta">Hire us</a>
  </section>
  <section id="work">
    <div class="reveal">One</div>
    <div class="card"><div class="card__banner" data-banner="/img/a.jpg"></div></div>
    <div class="card"><div class="card__banner"></div></div>
  </section>
  <section id="contact">
    <span class="count" id="projects" data-target="50">0</span>
    <span class="count" id="bad" data-target="lots">?</span>
    <span class="count" id="none">-</span>
    <button id="cta">Contact</button>
  </section>
</main>
</body>
</html>"##;

fn site() -> Page {
    let mut page = Page::parse(SITE).unwrap();
    page.set_geometry("#intro", Geometry::new(0.0, 400.0)).unwrap();
    page.set_geometry("#work", Geometry::new(400.0, 500.0)).unwrap();
    page.set_geometry("#contact", Geometry::new(900.0, 1600.0)).unwrap();
    page.set_geometry(".reveal", Geometry::new(1200.0, 100.0)).unwrap();
    page.set_geometry(".count", Geometry::new(2000.0, 50.0)).unwrap();
    page.set_geometry("#cta", Geometry::new(2100.0, 40.0)).unwrap();
    page
}

fn open(page: Page) -> Runner {
    Runner::open(page, &GlintConfig::default())
}

fn node(runner: &Runner, selector: &str) -> crate::dom::NodeId {
    runner.page().query(selector).unwrap()
}

fn has_class(runner: &Runner, selector: &str, class: &str) -> bool {
    runner.page().has_class(&node(runner, selector), class)
}

fn attr(runner: &Runner, selector: &str, name: &str) -> Option<String> {
    runner.page().attr(&node(runner, selector), name)
}

fn text(runner: &Runner, selector: &str) -> String {
    runner.page().text(&node(runner, selector))
}

fn focused(runner: &Runner) -> Option<String> {
    runner.page().focused().map(|n| runner.page().describe(n))
}

// ============================================================================
// attach
// ============================================================================

#[test]
fn test_registration_order() {
    let runner = open(site());
    assert_eq!(
        runner.enhancer().behavior_names(),
        vec![
            "anchor", "header", "nav", "spy", "reveal", "counter", "parallax", "backdrop"
        ]
    );
}

#[test]
fn test_empty_page_binds_nothing() {
    let mut runner = open(Page::parse("<html><body><p>plain</p></body></html>").unwrap());
    assert!(runner.enhancer().behavior_names().is_empty());

    runner.scroll(500.0);
    runner.load();
    assert_eq!(runner.key("Escape"), Flow::Continue);
    assert_eq!(runner.click("p").unwrap(), Flow::Continue);
    runner.advance(100.0);
    assert!(runner.page().to_html().contains("<p>plain</p>"));
}

#[test]
fn test_disabled_section_is_not_bound() {
    let mut config = GlintConfig::default();
    config.header.enable = false;
    let runner = Runner::open(site(), &config);
    assert!(!runner.enhancer().behavior_names().contains(&"header"));
}

#[test]
fn test_motion_override_beats_media_query() {
    let mut config = GlintConfig::default();
    config.motion.force_reduced = Some(true);
    let runner = Runner::open(site(), &config);
    assert!(runner.enhancer().motion().is_reduced());

    let mut config = GlintConfig::default();
    config.motion.force_reduced = Some(false);
    let runner = Runner::open(site().with_reduced_motion(true), &config);
    assert!(!runner.enhancer().motion().is_reduced());
}

// ============================================================================
// anchor
// ============================================================================

#[test]
fn test_anchor_scrolls_and_focuses_target() {
    let mut runner = open(site());
    let flow = runner.click(r##"a.nav__link[href="#work"]"##).unwrap();

    assert_eq!(flow, Flow::PreventDefault);
    let requests = runner.page().scroll_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target, "section#work");
    assert_eq!(requests[0].behavior, ScrollBehavior::Smooth);
    assert_eq!(runner.page().scroll_y(), 400.0);
    assert_eq!(focused(&runner).as_deref(), Some("section#work"));
    assert_eq!(attr(&runner, "#work", "tabindex").as_deref(), Some("-1"));
    // Default navigation was suppressed
    assert_eq!(runner.page().hash(), None);
}

#[test]
fn test_anchor_reduced_motion_jumps() {
    let mut runner = open(site().with_reduced_motion(true));
    runner.click(".cta-link").unwrap();
    assert_eq!(
        runner.page().scroll_requests()[0].behavior,
        ScrollBehavior::Auto
    );
}

#[test]
fn test_anchor_focusable_target_keeps_tabindex() {
    let mut runner = open(site());
    runner.click(".cta-link").unwrap();
    assert_eq!(focused(&runner).as_deref(), Some("button#cta"));
    assert_eq!(attr(&runner, "#cta", "tabindex"), None);
}

#[test]
fn test_anchor_click_on_nested_element() {
    let mut runner = open(site());
    let flow = runner.click(".label").unwrap();
    assert!(flow.is_prevented());
    assert_eq!(focused(&runner).as_deref(), Some("section#contact"));
}

#[test]
fn test_anchor_missing_target_navigates() {
    let mut runner = open(site());
    let flow = runner.click(".lost").unwrap();
    assert_eq!(flow, Flow::Continue);
    assert!(runner.page().scroll_requests().is_empty());
    assert_eq!(runner.page().focused(), None);
    assert_eq!(runner.page().hash(), Some("#missing"));
}

#[test]
fn test_anchor_bare_hash_is_ignored() {
    let mut runner = open(site());
    assert_eq!(runner.click(".top").unwrap(), Flow::Continue);
    assert!(runner.page().scroll_requests().is_empty());
    assert_eq!(runner.page().hash(), Some("#"));
}

#[test]
fn test_anchor_scroll_updates_scroll_listeners() {
    let mut runner = open(site());
    runner.click(".cta-link").unwrap();
    // The jump to 2100 is delivered as a scroll event
    assert!(has_class(&runner, ".header", "is-scrolled"));
    assert!(has_class(&runner, r##".nav__link[href="#contact"]"##, "is-active"));
}

// ============================================================================
// header
// ============================================================================

#[test]
fn test_header_boundary_is_strict() {
    let mut runner = open(site());
    assert!(!has_class(&runner, ".header", "is-scrolled"));

    runner.scroll(9.0);
    assert!(has_class(&runner, ".header", "is-scrolled"));

    runner.scroll(8.0);
    assert!(!has_class(&runner, ".header", "is-scrolled"));

    runner.scroll(0.0);
    assert!(!has_class(&runner, ".header", "is-scrolled"));
}

#[test]
fn test_header_checked_at_attach() {
    let mut page = site();
    page.set_scroll_y(300.0);
    let runner = open(page);
    assert!(has_class(&runner, ".header", "is-scrolled"));
}

// ============================================================================
// nav
// ============================================================================

fn assert_nav(runner: &Runner, open: bool) {
    assert_eq!(has_class(runner, "#site-nav", "is-open"), open);
    assert_eq!(
        attr(runner, ".nav__toggle", "aria-expanded").as_deref(),
        Some(if open { "true" } else { "false" })
    );
    assert_eq!(has_class(runner, "body", "no-scroll"), open);
}

#[test]
fn test_nav_toggle_syncs_all_facets() {
    let mut runner = open(site());
    assert_nav(&runner, false);

    runner.click(".nav__toggle").unwrap();
    assert_nav(&runner, true);

    // Clicking inside the toggle counts as a toggle click
    runner.click(".nav__toggle span").unwrap();
    assert_nav(&runner, false);
}

#[test]
fn test_nav_escape_closes_and_refocuses() {
    let mut runner = open(site());
    runner.click(".nav__toggle").unwrap();

    runner.key("Escape");
    assert_nav(&runner, false);
    assert_eq!(focused(&runner).as_deref(), Some("button.nav__toggle"));
}

#[test]
fn test_nav_escape_while_closed_does_nothing() {
    let mut runner = open(site());
    runner.key("Escape");
    assert_nav(&runner, false);
    assert_eq!(runner.page().focused(), None);

    runner.click(".nav__toggle").unwrap();
    runner.key("Enter");
    assert_nav(&runner, true);
}

#[test]
fn test_nav_link_closes_and_anchor_keeps_focus() {
    let mut runner = open(site());
    runner.click(".nav__toggle").unwrap();

    runner.click(r##"a.nav__link[href="#work"]"##).unwrap();
    assert_nav(&runner, false);
    assert_eq!(focused(&runner).as_deref(), Some("section#work"));
}

#[test]
fn test_nav_outside_click_keeps_menu() {
    let mut runner = open(site());
    runner.click(".nav__toggle").unwrap();
    runner.click(".brand").unwrap();
    assert_nav(&runner, true);
}

#[test]
fn test_nav_drawer_variant() {
    const DRAWER: &str = r##"<html><body>
<button class="nav__toggle" aria-expanded="false">Menu</button>
<aside class="nav__drawer">
  <a class="nav__link" href="/about">About</a>
</aside>
</body></html>"##;

    let mut config = GlintConfig::default();
    config.nav.container = ".nav__drawer".into();
    let mut runner = Runner::open(Page::parse(DRAWER).unwrap(), &config);
    assert_eq!(runner.enhancer().behavior_names(), vec!["nav"]);

    runner.click(".nav__toggle").unwrap();
    assert!(has_class(&runner, ".nav__drawer", "is-open"));
    assert!(has_class(&runner, "body", "no-scroll"));

    runner.click(".nav__link").unwrap();
    assert!(!has_class(&runner, ".nav__drawer", "is-open"));
    assert!(!has_class(&runner, "body", "no-scroll"));
}

#[test]
fn test_nav_needs_container() {
    let mut config = GlintConfig::default();
    config.nav.container = "#elsewhere".into();
    let runner = Runner::open(site(), &config);
    assert!(!runner.enhancer().behavior_names().contains(&"nav"));
}

// ============================================================================
// spy
// ============================================================================

#[test]
fn test_spy_last_qualifying_section_wins() {
    let mut runner = open(site());
    runner.scroll(500.0);

    assert!(has_class(&runner, r##".nav__link[href="#work"]"##, "is-active"));
    assert!(!has_class(&runner, r##".nav__link[href="#intro"]"##, "is-active"));
    assert!(!has_class(&runner, r##".nav__link[href="#contact"]"##, "is-active"));
}

#[test]
fn test_spy_defaults_to_first_section_on_load() {
    let mut runner = open(site());
    // Nothing is highlighted before the first scroll or load
    assert!(!has_class(&runner, r##".nav__link[href="#intro"]"##, "is-active"));

    runner.load();
    assert!(has_class(&runner, r##".nav__link[href="#intro"]"##, "is-active"));
}

#[test]
fn test_spy_lookahead_offset() {
    let mut runner = open(site());
    // 310 + 90 = 400 reaches #work exactly
    runner.scroll(310.0);
    assert!(has_class(&runner, r##".nav__link[href="#work"]"##, "is-active"));

    runner.scroll(309.0);
    assert!(has_class(&runner, r##".nav__link[href="#intro"]"##, "is-active"));
    assert!(!has_class(&runner, r##".nav__link[href="#work"]"##, "is-active"));
}

// ============================================================================
// reveal
// ============================================================================

#[test]
fn test_reveal_once_and_stays() {
    let mut runner = open(site());
    let el = node(&runner, ".reveal");
    assert!(!has_class(&runner, ".reveal", "is-visible"));
    assert!(runner.enhancer().observers().is_observed(&el));

    runner.scroll(500.0);
    assert!(has_class(&runner, ".reveal", "is-visible"));
    assert!(!runner.enhancer().observers().is_observed(&el));

    // Leaving and re-entering changes nothing
    runner.scroll(0.0);
    assert!(has_class(&runner, ".reveal", "is-visible"));
    runner.scroll(500.0);
    assert!(has_class(&runner, ".reveal", "is-visible"));
}

#[test]
fn test_reveal_threshold() {
    let mut runner = open(site());
    // 10px of 100px visible
    runner.scroll(410.0);
    assert!(!has_class(&runner, ".reveal", "is-visible"));

    // 12px of 100px visible
    runner.scroll(412.0);
    assert!(has_class(&runner, ".reveal", "is-visible"));
}

#[test]
fn test_reveal_visible_at_attach() {
    let mut page = site();
    page.set_scroll_y(1000.0);
    let runner = open(page);
    assert!(has_class(&runner, ".reveal", "is-visible"));
}

// ============================================================================
// counter
// ============================================================================

#[test]
fn test_counter_counts_up_monotonically() {
    let mut runner = open(site());
    runner.scroll(1500.0);

    let mut values = Vec::new();
    for _ in 0..100 {
        runner.frame();
        values.push(text(&runner, "#projects").parse::<i64>().unwrap());
    }

    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert!(values.iter().any(|v| *v > 0 && *v < 50));
    assert_eq!(text(&runner, "#projects"), "50");
    assert!(!runner.enhancer().wants_frame());
}

#[test]
fn test_counter_is_one_shot() {
    let mut runner = open(site());
    runner.scroll(1500.0);
    runner.advance(1200.0);
    assert_eq!(text(&runner, "#projects"), "50");

    let el = node(&runner, "#projects");
    assert!(!runner.enhancer().observers().is_observed(&el));

    // A restart would show a partial count 100ms in
    runner.scroll(0.0);
    runner.scroll(1500.0);
    runner.advance(100.0);
    assert_eq!(text(&runner, "#projects"), "50");
}

#[test]
fn test_counter_strict_skips_invalid_targets() {
    let mut runner = open(site());
    runner.scroll(1500.0);
    runner.advance(1200.0);

    assert_eq!(text(&runner, "#bad"), "?");
    assert_eq!(text(&runner, "#none"), "-");
    // Skipped counters still stop being observed
    for selector in ["#bad", "#none"] {
        let el = node(&runner, selector);
        assert!(!runner.enhancer().observers().is_observed(&el));
    }
}

#[test]
fn test_counter_lenient_counts_to_zero() {
    let mut config = GlintConfig::default();
    config.counter.parse = CounterParse::Lenient;
    let mut runner = Runner::open(site(), &config);
    runner.scroll(1500.0);
    runner.advance(1200.0);

    assert_eq!(text(&runner, "#bad"), "0");
    assert_eq!(text(&runner, "#none"), "0");
    assert_eq!(text(&runner, "#projects"), "50");
}

#[test]
fn test_counter_target_beyond_i64() {
    let mut page =
        Page::parse(r#"<body><span class="count" data-target="99999999999999999999">0</span></body>"#)
            .unwrap();
    page.set_geometry(".count", Geometry::new(100.0, 50.0)).unwrap();
    let mut runner = open(page);

    runner.advance(400.0);
    let partial = text(&runner, ".count");
    assert_ne!(partial, "0");
    assert!(!partial.contains('e'), "{partial}");

    runner.advance(1200.0);
    assert_eq!(text(&runner, ".count"), "100000000000000000000");
}

#[test]
fn test_counter_reduced_motion_is_immediate() {
    let mut runner = open(site().with_reduced_motion(true));
    runner.scroll(1500.0);
    runner.frame();
    assert_eq!(text(&runner, "#projects"), "50");
    assert!(!runner.enhancer().wants_frame());
}

#[test]
fn test_counter_needs_threshold() {
    let mut runner = open(site());
    // 25px of 50px visible: below 0.6
    runner.scroll(1225.0);
    runner.advance(100.0);
    assert_eq!(text(&runner, "#projects"), "0");

    // 30px of 50px visible
    runner.scroll(1230.0);
    runner.advance(1200.0);
    assert_eq!(text(&runner, "#projects"), "50");
}

// ============================================================================
// parallax
// ============================================================================

fn transform(runner: &Runner) -> Option<String> {
    runner
        .page()
        .computed_style(&node(runner, ".hero__badge-img"), "transform")
}

#[test]
fn test_parallax_clamps() {
    let mut runner = open(site());
    runner.scroll(10000.0);
    runner.frame();
    assert_eq!(transform(&runner).as_deref(), Some("translateY(16px)"));

    runner.scroll(100.0);
    runner.frame();
    assert_eq!(transform(&runner).as_deref(), Some("translateY(4px)"));
}

#[test]
fn test_parallax_coalesces_scrolls() {
    let mut runner = open(site());
    runner.scroll(100.0);
    runner.scroll(200.0);
    assert!(runner.enhancer().wants_frame());
    // Applied only when the frame runs
    assert_eq!(transform(&runner), None);

    runner.frame();
    assert_eq!(transform(&runner).as_deref(), Some("translateY(8px)"));
    assert!(!runner.enhancer().wants_frame());
}

#[test]
fn test_parallax_off_with_reduced_motion() {
    let mut runner = open(site().with_reduced_motion(true));
    assert!(!runner.enhancer().behavior_names().contains(&"parallax"));

    runner.scroll(300.0);
    runner.frame();
    assert_eq!(transform(&runner), None);
}

// ============================================================================
// backdrop
// ============================================================================

fn background(runner: &Runner, selector: &str) -> Option<String> {
    runner
        .page()
        .computed_style(&node(runner, selector), "background-image")
}

#[test]
fn test_backdrop_attribute_strategy() {
    let runner = open(site());
    assert_eq!(
        background(&runner, ".hero--image").as_deref(),
        Some(r#"url("/img/hero.jpg")"#)
    );
    assert_eq!(
        background(&runner, "[data-banner]").as_deref(),
        Some(r#"url("/img/a.jpg")"#)
    );
    // Banner without the attribute is left alone
    let doc = runner.page().document();
    let banners = doc.query_all(&crate::dom::Selector::parse(".card__banner").unwrap());
    assert_eq!(banners.len(), 2);
    assert_eq!(runner.page().attr(&banners[1], "style"), None);
}

fn preload_config() -> GlintConfig {
    let mut config = GlintConfig::default();
    config.backdrop.strategy = BackdropStrategy::Preload;
    config
}

#[test]
fn test_backdrop_preload_marks_ready() {
    let mut page = site();
    page.set_computed_style(".hero--image", "background-image", r#"url("/img/hero.jpg")"#)
        .unwrap();
    let mut runner = Runner::open(page, &preload_config());
    assert!(!has_class(&runner, ".hero--image", "ready"));
    // No inline styles in this mode
    assert_eq!(attr(&runner, ".hero--image", "style"), None);

    runner.frame();
    assert!(has_class(&runner, ".hero--image", "ready"));
    assert_eq!(runner.page().preloaded(), ["/img/hero.jpg"]);
}

#[test]
fn test_backdrop_preload_failure_never_ready() {
    let mut page = site();
    page.set_computed_style(".hero--image", "background-image", "url(/img/broken.jpg)")
        .unwrap();
    page.fail_image("/img/broken.jpg");
    let mut runner = Runner::open(page, &preload_config());
    runner.advance(500.0);
    assert!(!has_class(&runner, ".hero--image", "ready"));
}

#[test]
fn test_backdrop_preload_without_image() {
    let mut page = site();
    page.set_computed_style(".hero--image", "background-image", "none")
        .unwrap();
    let mut runner = Runner::open(page, &preload_config());
    runner.advance(100.0);
    assert!(runner.page().preloaded().is_empty());
    assert!(!has_class(&runner, ".hero--image", "ready"));

    // No stylesheet value at all behaves the same
    let mut runner = Runner::open(site(), &preload_config());
    runner.advance(100.0);
    assert!(runner.page().preloaded().is_empty());
}
