//! `xwork version` — show the work server version for the selected chain.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::settle;

/// Run the version command.
///
/// # Errors
///
/// Returns an error if no session can be opened or the query fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let reporter = app.reporter();
    let version = app.adapters().fetch_version(&app.chain).await;
    let version = settle(reporter, version, "server reached")?;
    app.renderer().render_version(&app.chain, &version)?;
    Ok(ExitCode::SUCCESS)
}
