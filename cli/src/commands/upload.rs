//! `xwork upload` — register a data file and print its address.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::settle;

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// File to upload, relative to the project directory
    pub path: PathBuf,
}

/// Run the upload command.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or the upload fails.
pub async fn run(app: &AppContext, args: &UploadArgs) -> Result<ExitCode> {
    let project = app.project()?;
    let reporter = app.reporter();
    let outcome = app
        .adapters()
        .upload_data(&app.chain, &project, &args.path, &reporter)
        .await;
    let outcome = settle(reporter, outcome, "data uploaded")?;
    app.renderer().render_upload(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
