//! Observable end state of a run.

use serde::Serialize;

use super::page::ScrollRequest;
use super::runner::Runner;

/// Everything a session can change, in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub elapsed_ms: f64,
    pub scroll_y: f64,
    pub motion: String,
    pub behaviors: Vec<String>,
    pub focused: Option<String>,
    pub hash: Option<String>,
    pub scroll_requests: Vec<ScrollRequest>,
    pub preloaded: Vec<String>,
    /// Elements still observed for intersection.
    pub observing: usize,
    pub html: String,
}

impl Snapshot {
    pub fn capture(runner: &Runner) -> Self {
        use crate::host::Host;

        let page = runner.page();
        Self {
            elapsed_ms: runner.now(),
            scroll_y: page.scroll_y(),
            motion: runner.enhancer().motion().to_string(),
            behaviors: runner
                .enhancer()
                .behavior_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            focused: page.focused().map(|node| page.describe(node)),
            hash: page.hash().map(str::to_string),
            scroll_requests: page.scroll_requests().to_vec(),
            preloaded: page.preloaded().to_vec(),
            observing: runner.enhancer().observers().len(),
            html: page.to_html(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlintConfig;
    use crate::headless::Page;

    #[test]
    fn test_snapshot_json() {
        let page = Page::parse(r#"<body><header class="header"></header></body>"#)
            .unwrap()
            .with_reduced_motion(true);
        let mut runner = Runner::open(page, &GlintConfig::default());
        runner.scroll(20.0);

        let snapshot = runner.snapshot();
        assert_eq!(snapshot.motion, "reduced");
        assert_eq!(snapshot.behaviors, vec!["header"]);
        assert_eq!(snapshot.focused, None);
        assert!(snapshot.html.contains("is-scrolled"));

        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["scroll_y"], 20.0);
        assert_eq!(json["observing"], 0);
    }
}
