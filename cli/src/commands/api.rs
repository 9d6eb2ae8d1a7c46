//! `xwork api` — call a named server operation and print its raw answer.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::invoke::signature;
use crate::commands::settle;

/// Arguments for the api command.
#[derive(Args)]
pub struct ApiArgs {
    /// Server operation, e.g. `getByUID`, `getApps`, `version`
    pub operation: String,

    /// Positional arguments forwarded unchanged
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Run the api command.
///
/// # Errors
///
/// Returns an error if no session can be opened or the server rejects the
/// call.
pub async fn run(app: &AppContext, args: ApiArgs) -> Result<ExitCode> {
    let label = signature(&args.operation, &args.args);
    let call: Vec<String> = std::iter::once(args.operation).chain(args.args).collect();
    let reporter = app.reporter();
    let value = app.adapters().invoke_generic(&app.chain, &call).await;
    let value = settle(reporter, value, "done")?;
    app.renderer().render_api(&label, &value)?;
    Ok(ExitCode::SUCCESS)
}
