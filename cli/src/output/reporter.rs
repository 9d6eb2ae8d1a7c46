//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// On a TTY, `step()` drives a single spinner; elsewhere it prints
/// `"  → {message}"`. Everything is suppressed when `ctx.quiet` or when the
/// reporter was built with [`TerminalReporter::silent`].
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    enabled: bool,
    spinner: Option<ProgressBar>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        let enabled = !ctx.quiet;
        let spinner = ctx.show_progress().then(|| progress::spinner("connecting..."));
        Self {
            ctx,
            enabled,
            spinner,
        }
    }

    /// Reporter that discards every event (stdout carries JSON).
    #[must_use]
    pub fn silent(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            enabled: false,
            spinner: None,
        }
    }

    /// Stop the spinner, leaving `message` as its final line.
    pub fn finish(&self, message: &str) {
        if let Some(pb) = &self.spinner {
            progress::finish_ok(pb, message);
        }
    }

    /// Stop the spinner after a failure.
    pub fn fail(&self, message: &str) {
        if let Some(pb) = &self.spinner {
            progress::finish_error(pb, message);
        }
    }

    fn print(&self, line: &str) {
        match &self.spinner {
            Some(pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some(pb) = self.spinner.as_ref().filter(|pb| !pb.is_finished()) {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.enabled {
            return;
        }
        match &self.spinner {
            Some(pb) => pb.set_message(message.to_string()),
            None => println!("  {} {message}", "→".style(self.ctx.styles.info)),
        }
    }

    fn success(&self, message: &str) {
        if self.enabled {
            self.print(&format!("  {} {message}", "✓".style(self.ctx.styles.success)));
        }
    }

    fn warn(&self, message: &str) {
        if self.enabled {
            self.print(&format!("  {} {message}", "⚠".style(self.ctx.styles.warning)));
        }
    }
}
