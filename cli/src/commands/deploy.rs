//! `xwork deploy` — register the project's application on the work server.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::settle;

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    /// Binary to upload from `apps/` (defaults to the project name)
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,
}

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or deployment fails.
pub async fn run(app: &AppContext, args: &DeployArgs) -> Result<ExitCode> {
    let project = app.project()?;
    let contracts = app.contracts(&project.name);
    let reporter = app.reporter();
    let outcome = app
        .adapters()
        .deploy_application(
            &app.chain,
            &project,
            &contracts,
            args.app.as_deref(),
            &reporter,
        )
        .await;
    let outcome = settle(reporter, outcome, "app registered")?;
    app.renderer().render_deploy(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
