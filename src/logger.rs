//! Logging utilities with colored output and session step display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only shown with `--verbose`
//! - `StepStatus` for per-step lines while a session runs
//!
//! Everything goes to stderr: stdout is reserved for `glint run` output.
//! On `wasm32` the same macros write to the browser console instead.
//!
//! # Example
//!
//! ```ignore
//! log!("check"; "{} behaviors bound", count);
//! debug!("nav"; "menu opened");
//!
//! let mut status = StepStatus::new();
//! status.success(16.0, "scroll 500");
//! status.failure(32.0, "click .missing", "selector matched nothing");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub fn log(module: &str, message: &str) {
    use std::io::{Write, stderr};

    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// Log a message to the browser console
#[cfg(target_arch = "wasm32")]
#[inline]
pub fn log(module: &str, message: &str) {
    console_line(&format!("[{module}] {message}"));
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn console_line(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
fn console_line(line: &str) {
    println!("{line}");
}

/// Apply color to a module prefix based on module type
#[cfg(not(target_arch = "wasm32"))]
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    use owo_colors::OwoColorize;

    let prefix = format!("[{module}]");
    match module_lower {
        "run" | "session" => prefix.bright_blue().bold().to_string(),
        "check" | "init" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" | "hint" => prefix.yellow().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Step Status (session progress with overwrite)
// ============================================================================

/// Format a simulated timestamp as a fixed-width `[   16ms]` tag.
fn stamp(at_ms: f64) -> String {
    format!("[{:>5}ms]", at_ms.round() as i64)
}

/// Per-step status display for `glint run`.
///
/// On a terminal, successful steps overwrite each other so only the latest one
/// stays visible; failures are never overwritten. When stderr is redirected,
/// every line is kept.
///
/// # Example
///
/// ```ignore
/// let mut status = StepStatus::new();
/// status.success(0.0, "load");
/// status.failure(16.0, "click .missing", "selector matched nothing");
/// ```
pub struct StepStatus {
    /// Lines of previous (overwritable) output to clear
    last_lines: usize,
    /// Whether in-place overwriting is possible
    live: bool,
    failures: usize,
}

impl StepStatus {
    /// Create a status display, detecting whether stderr is a terminal.
    pub fn new() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let live = {
            use std::io::IsTerminal;
            std::io::stderr().is_terminal()
        };
        #[cfg(target_arch = "wasm32")]
        let live = false;

        Self {
            last_lines: 0,
            live,
            failures: 0,
        }
    }

    /// Display success message (✓ prefix, green). Overwritable.
    pub fn success(&mut self, at_ms: f64, message: &str) {
        self.display(at_ms, Symbol::Ok, message);
        self.last_lines = if self.live { 1 } else { 0 };
    }

    /// Display failure message (✗ prefix, red) with optional detail. Sticky.
    pub fn failure(&mut self, at_ms: f64, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}\n{detail}")
        };
        self.display(at_ms, Symbol::Failed, &message);
        self.last_lines = 0;
        self.failures += 1;
    }

    /// Number of failed steps reported so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn display(&mut self, at_ms: f64, symbol: Symbol, message: &str) {
        use crossterm::{
            cursor, execute,
            terminal::{Clear, ClearType},
        };
        use owo_colors::OwoColorize;
        use std::io::{Write, stderr};

        let mut stderr = stderr().lock();

        // Clear previous overwritable output by moving cursor up and clearing
        if self.live && self.last_lines > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let lines = self.last_lines as u16;
            execute!(stderr, cursor::MoveUp(lines)).ok();
            execute!(stderr, Clear(ClearType::FromCursorDown)).ok();
        }

        let timestamp = stamp(at_ms).dimmed().to_string();
        let symbol = match symbol {
            Symbol::Ok => "✓".green().to_string(),
            Symbol::Failed => "✗".red().to_string(),
        };
        writeln!(stderr, "{timestamp} {symbol} {message}").ok();
        stderr.flush().ok();
    }

    #[cfg(target_arch = "wasm32")]
    fn display(&mut self, at_ms: f64, symbol: Symbol, message: &str) {
        let symbol = match symbol {
            Symbol::Ok => "✓",
            Symbol::Failed => "✗",
        };
        console_line(&format!("{} {symbol} {message}", stamp(at_ms)));
    }
}

impl Default for StepStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
enum Symbol {
    Ok,
    Failed,
}

// ============================================================================
// Tests
// ============================================================================
