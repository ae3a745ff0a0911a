//! Logging utilities with colored output.
//!
//! - `log!` prints a message with a colored `[module]` prefix
//! - `debug!` does the same, only when `--verbose` is enabled
//! - `WarningTally` counts warnings emitted by a command so it can report
//!   a summary at the end
//!
//! # Example
//!
//! ```ignore
//! log!("manifest"; "indexed {} variants", count);
//! debug!("content"; "skipping record without slug at {}", idx);
//! ```
//!
//! Messages go to stderr: stdout is reserved for command output (JSON, links).

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    fmt::Display,
    io::{Write, stderr},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

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
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Log a warning and count it in the global tally
#[macro_export]
macro_rules! warn {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::WARNINGS.inc();
        $crate::logger::log("warning", &format!("[{}] {}", $module, format!($($arg)*)))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut out = stderr().lock();
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let style = match module_lower {
        "router" | "resolve" => Style::new().bright_blue(),
        "manifest" | "assets" => Style::new().bright_green(),
        "error" => Style::new().bright_red(),
        "warning" => Style::new().bright_magenta(),
        _ => Style::new().bright_yellow(),
    };
    paint(format!("[{module}]"), style.bold())
}

/// Style text bound for stderr, honoring `--color` and terminal detection.
pub fn paint(text: impl Display, style: Style) -> String {
    text.if_supports_color(Stream::Stderr, |t| t.style(style))
        .to_string()
}

// ============================================================================
// Warning Tally
// ============================================================================

/// Global warning counter, incremented by `warn!`
pub static WARNINGS: WarningTally = WarningTally::new();

/// Counts warnings emitted during a command.
#[derive(Debug)]
pub struct WarningTally(AtomicUsize);

impl WarningTally {
    pub const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_override() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("router", "router"), "[router]");
        assert_eq!(colorize_prefix("Manifest", "manifest"), "[Manifest]");
        assert_eq!(paint("found", Style::new().red()), "found");

        owo_colors::set_override(true);
        let colored = colorize_prefix("router", "router");
        assert!(colored.starts_with('\u{1b}') && colored.contains("[router]"));
        owo_colors::unset_override();
    }

    #[test]
    fn test_tally_counts() {
        let tally = WarningTally::new();
        assert_eq!(tally.count(), 0);
        tally.inc();
        tally.inc();
        assert_eq!(tally.count(), 2);
    }
}
