//! `xwork result` — show, await, and download the result of a work.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::work::WaitPolicy;
use crate::commands::settle;
use crate::domain::{SaveTarget, WorkError};

/// Arguments for the result command.
#[derive(Args)]
pub struct ResultArgs {
    /// UID of the work, as printed by `xwork submit`
    pub work_uid: String,

    /// Download the result: to `<work-uid>.<type>`, or `<NAME>.<type>` when a
    /// name is given
    #[arg(long, value_name = "NAME", num_args = 0..=1)]
    pub save: Option<Option<String>>,

    /// Wait until the work reaches a terminal status (Ctrl-C stops waiting)
    #[arg(long)]
    pub watch: bool,

    /// Give up waiting after this many seconds [env: XWORK_WAIT_TIMEOUT]
    #[arg(long, value_name = "SECS", requires = "watch")]
    pub timeout: Option<u64>,
}

/// Run the result command.
///
/// A work that is still running or ended without a result is reported, not
/// treated as a failure.
///
/// # Errors
///
/// Returns an error for an unknown work, a timeout, cancellation, or a
/// failed download.
pub async fn run(app: &AppContext, args: ResultArgs) -> Result<ExitCode> {
    let policy = match args
        .timeout
        .map(Duration::from_secs)
        .or_else(|| app.settings.wait_timeout())
    {
        Some(limit) => WaitPolicy::with_timeout(limit),
        None => WaitPolicy::unbounded(),
    };
    let save = SaveTarget::from_flag(args.save);

    let reporter = app.reporter();
    let adapters = app.adapters();
    let fetch = adapters.fetch_result(
        &app.chain,
        &args.work_uid,
        &save,
        args.watch,
        policy,
        &reporter,
    );
    let outcome = tokio::select! {
        outcome = fetch => outcome,
        _ = tokio::signal::ctrl_c(), if args.watch => Err(WorkError::Cancelled {
            uid: args.work_uid.clone(),
        }
        .into()),
    };
    let outcome = settle(reporter, outcome, "result fetched")?;
    app.renderer().render_result(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
