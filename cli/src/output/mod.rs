//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
use serde_json::Value;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::operations::{DeployOutcome, ResultOutcome, UploadOutcome};
use crate::domain::Identifier;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Mode-dispatching renderer: commands call `app.renderer().render_*()` and
/// never branch on the output mode themselves.
pub enum Renderer<'a> {
    /// Human-readable terminal output.
    Human(HumanRenderer<'a>),
    /// Machine-readable JSON on stdout.
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_deploy(&self, outcome: &DeployOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_deploy(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_deploy(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_upload(&self, outcome: &UploadOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_upload(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_upload(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_submit(&self, app_uid: &str, work_uid: &Identifier) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_submit(app_uid, work_uid);
                Ok(())
            }
            Self::Json(r) => r.render_submit(app_uid, work_uid),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_result(&self, outcome: &ResultOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_result(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_result(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, chain: &str, server_version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(chain, server_version);
                Ok(())
            }
            Self::Json(r) => r.render_version(chain, server_version),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_api(&self, signature: &str, value: &Value) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_api(signature, value);
                Ok(())
            }
            Self::Json(r) => r.render_api(value),
        }
    }
}
