//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;
use serde_json::Value;

use crate::application::services::operations::{DeployOutcome, ResultOutcome, UploadOutcome};
use crate::domain::Identifier;
use crate::output::OutputContext;

/// Renders operation outcomes as human-readable terminal output using
/// `OutputContext`.
///
/// In quiet mode only the identifier a script would capture is printed.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    fn reference(&self, value: &str) -> String {
        value.style(self.ctx.styles.reference).to_string()
    }

    /// Render a successful deployment.
    pub fn render_deploy(&self, outcome: &DeployOutcome) {
        if self.ctx.quiet {
            println!("{}", outcome.app_uid);
            return;
        }
        self.ctx.success(&format!("App deployed on chain {}", outcome.chain));
        self.ctx.kv("App UID:  ", &self.reference(outcome.app_uid.as_str()));
        self.ctx.kv("Contract: ", &outcome.contract_address);
    }

    /// Render a successful data upload.
    pub fn render_upload(&self, outcome: &UploadOutcome) {
        if self.ctx.quiet {
            println!("{}", outcome.address);
            return;
        }
        self.ctx.success("Data uploaded");
        self.ctx.kv("Data UID: ", outcome.data_uid.as_str());
        self.ctx.kv("Address:  ", &self.reference(outcome.address.as_str()));
    }

    /// Render a submitted work.
    pub fn render_submit(&self, app_uid: &str, work_uid: &Identifier) {
        if self.ctx.quiet {
            println!("{work_uid}");
            return;
        }
        self.ctx.success(&format!("Work submitted to app {app_uid}"));
        self.ctx.kv("Work UID: ", &self.reference(work_uid.as_str()));
        self.ctx
            .info(&format!("Run `xwork result {work_uid} --watch` to follow it"));
    }

    /// Render the outcome of a result query.
    pub fn render_result(&self, outcome: &ResultOutcome) {
        match outcome {
            ResultOutcome::InProgress { work_uid, status } => {
                self.ctx.info(&format!(
                    "Work {work_uid} is not completed yet (status: {status})"
                ));
                self.ctx.info("Use --watch to wait for completion");
            }
            ResultOutcome::Failed { work_uid, status } => {
                self.ctx.warn(&format!("Work {work_uid} ended with status {status}"));
            }
            ResultOutcome::Completed {
                work_uid,
                result_address,
                saved_to,
            } => {
                if self.ctx.quiet {
                    match saved_to {
                        Some(path) => println!("{}", path.display()),
                        None => println!("{result_address}"),
                    }
                    return;
                }
                self.ctx.success(&format!("Work {work_uid} completed"));
                self.ctx.kv("Result:   ", &self.reference(result_address.as_str()));
                if let Some(path) = saved_to {
                    self.ctx.kv("Saved to: ", &path.display().to_string());
                }
            }
        }
    }

    /// Render the server version for `chain`.
    pub fn render_version(&self, chain: &str, server_version: &str) {
        if self.ctx.quiet {
            println!("{server_version}");
            return;
        }
        self.ctx.kv("Client:   ", env!("CARGO_PKG_VERSION"));
        self.ctx.kv("Server:   ", &format!("{server_version} ({chain})"));
    }

    /// Render the raw answer of a named operation.
    pub fn render_api(&self, signature: &str, value: &Value) {
        if !self.ctx.quiet {
            self.ctx.header(signature);
        }
        match value {
            Value::String(text) => println!("{text}"),
            other => println!(
                "{}",
                serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())
            ),
        }
    }
}
