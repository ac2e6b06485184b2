//! `glint check`: which behaviors bind to a page.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::Path;

use crate::behavior;
use crate::config::GlintConfig;
use crate::headless::{Page, Runner};
use crate::log;

/// Outcome of binding one behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStatus {
    Bound,
    /// Enabled, but its elements are not on the page.
    Absent,
    Disabled,
}

/// Status of every behavior, in registration order.
pub fn summarize(config: &GlintConfig, bound: &[&str]) -> Vec<(&'static str, BindStatus)> {
    behavior::NAMES
        .iter()
        .map(|name| {
            let status = if bound.contains(name) {
                BindStatus::Bound
            } else if behavior::is_enabled(config, name) {
                BindStatus::Absent
            } else {
                BindStatus::Disabled
            };
            (*name, status)
        })
        .collect()
}

pub fn check_page(path: &Path, config: &GlintConfig) -> Result<()> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    let page = Page::parse(&html).with_context(|| format!("failed to parse `{}`", path.display()))?;

    let runner = Runner::open(page, config);
    let enhancer = runner.enhancer();
    let bound = enhancer.behavior_names();

    log!(
        "check";
        "{}: {} of {} behaviors bound (motion {})",
        path.display(),
        bound.len(),
        behavior::NAMES.len(),
        enhancer.motion()
    );
    for (name, status) in summarize(config, &bound) {
        match status {
            BindStatus::Bound => eprintln!("  {} {}", "✓".green(), name),
            BindStatus::Absent => eprintln!("  {} {} {}", "-".dimmed(), name, "(not on page)".dimmed()),
            BindStatus::Disabled => eprintln!("  {} {} {}", "-".dimmed(), name, "(disabled)".dimmed()),
        }
    }
    if !enhancer.observers().is_empty() {
        log!("check"; "{} element(s) waiting for intersection", enhancer.observers().len());
    }
    Ok(())
}
