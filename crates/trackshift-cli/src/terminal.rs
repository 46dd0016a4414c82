// Rust guideline compliant 2026-10-18

//! Terminal status output for the Trackshift CLI.
//!
//! Operator-facing status lines go to stderr so they never mix with the
//! summary tables printed on stdout.

use std::env;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Determines if colored output should be used.
///
/// Respects the `--no-color` flag, the NO_COLOR environment variable and
/// whether stderr is a terminal.
///
/// # Arguments
/// * `no_color` - Whether colors were disabled on the command line
///
/// # Returns
/// `true` if colored output should be used, `false` otherwise
pub fn should_use_color(no_color: bool) -> bool {
    if no_color || env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stderr)
}

/// Colored status printer.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    choice: ColorChoice,
}

impl Console {
    /// Creates a console printer.
    ///
    /// # Arguments
    /// * `use_color` - Whether to emit color codes
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self { choice }
    }

    /// Prints a whole line in one color.
    pub fn print_line(&self, text: &str, color: Color) {
        let mut stderr = StandardStream::stderr(self.choice);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = write!(stderr, "{}", text);
        let _ = stderr.reset();
        let _ = writeln!(stderr);
    }

    /// Prints a message with a bold colored prefix.
    pub fn print_status(&self, prefix: &str, prefix_color: Color, message: &str) {
        let mut stderr = StandardStream::stderr(self.choice);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(prefix_color)).set_bold(true));
        let _ = write!(stderr, "{}: ", prefix);
        let _ = stderr.reset();
        let _ = writeln!(stderr, "{}", message);
    }

    /// Announces work starting on a project.
    pub fn start(&self, message: &str) {
        self.print_line(message, Color::Yellow);
    }

    /// Prints a success message.
    pub fn success(&self, message: &str) {
        self.print_status("✓", Color::Green, message);
    }

    /// Prints an error message.
    pub fn error(&self, message: &str) {
        self.print_status("✗", Color::Red, message);
    }

    /// Prints a warning message.
    pub fn warning(&self, message: &str) {
        self.print_status("⚠", Color::Yellow, message);
    }
}
