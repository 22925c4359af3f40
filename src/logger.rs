//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only printed with `--verbose`
//! - `ProgressLine` for a single-line batch counter
//! - `item_ok` / `item_failed` for summary list entries
//!
//! # Example
//!
//! ```ignore
//! log!("nobg"; "processing {}", path.display());
//!
//! let progress = ProgressLine::new("nobg", &[("images", 3)]);
//! progress.inc("images");
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    cell::Cell,
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
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

/// Whether a `ProgressLine` currently owns the last terminal line
static BAR_ACTIVE: AtomicBool = AtomicBool::new(false);

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
///
/// Clears an active `ProgressLine` first so the message gets its own line.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();

    if BAR_ACTIVE.load(Ordering::SeqCst) {
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
    } else {
        execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    }

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "nobg" => Style::new().bright_blue().bold(),
        "done" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    paint(&prefix, style)
}

/// Style text for stdout, honouring `--color` and TTY detection.
#[inline]
fn paint(text: &str, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style))
        .to_string()
}

/// Summary entry for a written file (✓ prefix, green).
pub fn item_ok(message: &str) {
    println!("  {} {}", paint("✓", Style::new().green()), message);
}

/// Summary entry for a failed file (✗ prefix, red).
pub fn item_failed(message: &str) {
    println!(
        "  {} {}",
        paint("✗", Style::new().red()),
        paint(message, Style::new().dimmed())
    );
}

// ============================================================================
// Progress Line (single-line counters)
// ============================================================================

/// Single-line progress display with multiple counters
///
/// Displays: `[nobg] images(2/4)`
///
/// `log!` clears the line before printing; the next `inc` redraws it
/// below the new message. Single-threaded: counters are plain `Cell`s.
pub struct ProgressLine {
    prefix: &'static str,
    counters: Vec<Counter>,
}

struct Counter {
    name: &'static str,
    total: usize,
    current: Cell<usize>,
}

impl ProgressLine {
    /// Create a new progress display.
    ///
    /// Only includes counters with total > 0.
    pub fn new(prefix: &'static str, items: &[(&'static str, usize)]) -> Self {
        let counters: Vec<_> = items
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|(name, total)| Counter {
                name,
                total: *total,
                current: Cell::new(0),
            })
            .collect();

        BAR_ACTIVE.store(true, Ordering::SeqCst);

        let progress = Self { prefix, counters };
        progress.display();
        progress
    }

    /// Increment the counter with the given name.
    #[inline]
    pub fn inc(&self, name: &str) {
        if let Some(counter) = self.counters.iter().find(|c| c.name == name) {
            counter.current.set(counter.current.get() + 1);
            self.display();
        }
    }

    fn render(&self) -> String {
        let parts: Vec<_> = self
            .counters
            .iter()
            .map(|c| format!("{}({}/{})", c.name, c.current.get(), c.total))
            .collect();
        let prefix = colorize_prefix(self.prefix, &self.prefix.to_ascii_lowercase());
        format!("{} {}", prefix, parts.join(" "))
    }

    /// Display the current progress line (overwrites current line).
    fn display(&self) {
        let line = self.render();
        let mut stdout = stdout().lock();
        // Clear line and write progress (no newline - stays on same line)
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        write!(stdout, "{line}").ok();
        stdout.flush().ok();
    }

    /// Finish progress display, preserve line and move to next line.
    pub fn finish(self) {
        BAR_ACTIVE.store(false, Ordering::SeqCst);

        let line = self.render();
        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();
        drop(stdout);

        std::mem::forget(self); // Prevent Drop from clearing
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        BAR_ACTIVE.store(false, Ordering::SeqCst);

        // Clear the line on drop (if not finished properly)
        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        stdout.flush().ok();
    }
}

// ============================================================================
// Tests
// ============================================================================
