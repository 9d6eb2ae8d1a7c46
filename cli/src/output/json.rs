//! JSON output helpers.
//!
//! Provides the machine-readable renderer used when `--json` is set, and the
//! error-object formatter used by every `--json` code path when a command
//! fails.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::services::operations::{DeployOutcome, ResultOutcome, UploadOutcome};
use crate::domain::Identifier;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice: `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

fn emit(value: &Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}

/// JSON object describing a result outcome.
#[must_use]
pub fn result_value(outcome: &ResultOutcome) -> Value {
    match outcome {
        ResultOutcome::InProgress { work_uid, status } => json!({
            "work_uid": work_uid.as_str(),
            "status": status.as_str(),
            "completed": false,
        }),
        ResultOutcome::Failed { work_uid, status } => json!({
            "work_uid": work_uid.as_str(),
            "status": status.as_str(),
            "completed": false,
        }),
        ResultOutcome::Completed {
            work_uid,
            result_address,
            saved_to,
        } => json!({
            "work_uid": work_uid.as_str(),
            "status": "COMPLETED",
            "completed": true,
            "result_address": result_address.as_str(),
            "saved_to": saved_to.as_ref().map(|p| p.display().to_string()),
        }),
    }
}

/// Renders operation outcomes as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_deploy(&self, outcome: &DeployOutcome) -> Result<()> {
        emit(&json!({
            "app_uid": outcome.app_uid.as_str(),
            "chain": outcome.chain,
            "contract_address": outcome.contract_address,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_upload(&self, outcome: &UploadOutcome) -> Result<()> {
        emit(&json!({
            "data_uid": outcome.data_uid.as_str(),
            "address": outcome.address.as_str(),
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_submit(&self, app_uid: &str, work_uid: &Identifier) -> Result<()> {
        emit(&json!({
            "app_uid": app_uid,
            "work_uid": work_uid.as_str(),
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_result(&self, outcome: &ResultOutcome) -> Result<()> {
        emit(&result_value(outcome))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, chain: &str, server_version: &str) -> Result<()> {
        emit(&json!({
            "client": env!("CARGO_PKG_VERSION"),
            "server": server_version,
            "chain": chain,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_api(&self, value: &Value) -> Result<()> {
        emit(value)
    }
}
