//! Colored terminal output.
//!
//! Uses `termcolor` for cross-platform colored terminal output.
//! Respects `NO_COLOR` environment variable and `--color` flag.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Styled output writer for terminal.
///
/// Results go to stdout; diagnostics go to stderr so the JSON on stdout stays
/// machine readable.
pub struct StyledOutput {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl StyledOutput {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
            stderr: StandardStream::stderr(choice),
        }
    }

    /// Write a line of plain text to stdout.
    pub fn println(&mut self, text: &str) {
        let _ = writeln!(self.stdout, "{}", text);
    }

    /// Write a diagnostic line to stderr with a colored label.
    fn diagnostic(&mut self, label: &str, color: Color, text: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(true);
        let _ = self.stderr.set_color(&spec);
        let _ = write!(self.stderr, "{}", label);
        let _ = self.stderr.reset();
        let _ = writeln!(self.stderr, ": {}", text);
    }

    /// Red bold `error:` line on stderr.
    pub fn error(&mut self, text: &str) {
        self.diagnostic("error", Color::Red, text);
    }

    /// Yellow bold `warning:` line on stderr.
    pub fn warning(&mut self, text: &str) {
        self.diagnostic("warning", Color::Yellow, text);
    }

    /// Green bold status line on stderr.
    pub fn success(&mut self, text: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        let _ = self.stderr.set_color(&spec);
        let _ = writeln!(self.stderr, "{}", text);
        let _ = self.stderr.reset();
    }

    pub fn flush(&mut self) {
        let _ = self.stdout.flush();
        let _ = self.stderr.flush();
    }
}
