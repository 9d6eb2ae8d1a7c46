//! `xwork submit` — submit the project's work parameters to a deployed app.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::settle;

/// Arguments for the submit command.
#[derive(Args)]
pub struct SubmitArgs {
    /// UID of the deployed app, as printed by `xwork deploy`
    pub app_uid: String,
}

/// Run the submit command.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or submission fails.
pub async fn run(app: &AppContext, args: &SubmitArgs) -> Result<ExitCode> {
    let project = app.project()?;
    let reporter = app.reporter();
    let work_uid = app
        .adapters()
        .submit_work(&app.chain, &project, &args.app_uid, &reporter)
        .await;
    let work_uid = settle(reporter, work_uid, "work submitted")?;
    app.renderer().render_submit(&args.app_uid, &work_uid)?;
    Ok(ExitCode::SUCCESS)
}
