//! `glint run`: play a session against a page.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::Write;

use super::{OutputFormat, RunArgs};
use crate::config::GlintConfig;
use crate::headless::{Runner, Session};
use crate::log;
use crate::logger::StepStatus;

/// Run every step, reporting each one, then write the result.
///
/// Failed steps are reported and skipped; the command fails at the end if
/// any step failed, after the output has been written.
pub fn run_session(args: &RunArgs, config: &GlintConfig) -> Result<()> {
    let html = fs::read_to_string(&args.page)
        .with_context(|| format!("failed to read `{}`", args.page.display()))?;
    let session = match &args.session {
        Some(path) => Session::load(path)
            .with_context(|| format!("failed to load session `{}`", path.display()))?,
        None => Session::default(),
    };

    let page = session.prepare(&html)?;
    let mut runner = Runner::open(page, config);
    log!(
        "run";
        "{} behavior(s) bound, {} step(s)",
        runner.enhancer().behavior_names().len(),
        session.steps.len()
    );

    let mut status = StepStatus::new();
    for step in &session.steps {
        let label = step.to_string();
        match runner.step(step) {
            Ok(()) => status.success(runner.now(), &label),
            Err(err) => status.failure(runner.now(), &label, &err.to_string()),
        }
    }

    let rendered = render(&runner, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            log!("run"; "wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    if status.failures() > 0 {
        bail!("{} step(s) failed", status.failures());
    }
    Ok(())
}

fn render(runner: &Runner, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Html => runner.page().to_html(),
        OutputFormat::Json => runner.snapshot().to_json()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PAGE: &str = r##"<html><body>
<header class="header"><a class="nav__link" href="#about">About</a></header>
<main><section id="about">About</section></main>
</body></html>"##;

    const SESSION: &str = r##"
[[geometry]]
selector = "#about"
top = 600
height = 400

[[step]]
click = 'a[href="#about"]'
"##;

    fn args(dir: &TempDir, session: Option<&str>, format: OutputFormat) -> RunArgs {
        let page = dir.path().join("index.html");
        fs::write(&page, PAGE).unwrap();
        let session = session.map(|content| {
            let path = dir.path().join("session.toml");
            fs::write(&path, content).unwrap();
            path
        });
        RunArgs {
            page,
            session,
            format,
            output: Some(dir.path().join("out")),
        }
    }

    #[test]
    fn test_run_writes_html() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir, Some(SESSION), OutputFormat::Html);
        run_session(&args, &GlintConfig::default()).unwrap();

        let out = fs::read_to_string(dir.path().join("out")).unwrap();
        assert!(out.contains(r#"class="header is-scrolled""#));
        assert!(out.contains(r#"<section id="about" tabindex="-1">"#));
    }

    #[test]
    fn test_run_writes_snapshot() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir, Some(SESSION), OutputFormat::Json);
        run_session(&args, &GlintConfig::default()).unwrap();

        let out = fs::read_to_string(dir.path().join("out")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["scroll_y"], 600.0);
        assert_eq!(json["focused"], "section#about");
        assert_eq!(json["scroll_requests"][0]["behavior"], "smooth");
    }

    #[test]
    fn test_failed_step_still_writes_output() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir, Some("[[step]]\nclick = \".missing\""), OutputFormat::Html);
        let err = run_session(&args, &GlintConfig::default()).unwrap_err();
        assert!(err.to_string().contains("1 step(s) failed"));
        assert!(dir.path().join("out").exists());
    }

    #[test]
    fn test_missing_page() {
        let args = RunArgs {
            page: PathBuf::from("/definitely/not/here.html"),
            session: None,
            format: OutputFormat::Html,
            output: None,
        };
        assert!(run_session(&args, &GlintConfig::default()).is_err());
    }
}
