//! Application service — work submission and tracking.
//!
//! The tracker never polls on its own: blocking waits are delegated to the
//! session, and this module only bounds them and classifies the outcome.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::{ServerSession, WorkParameters};
use crate::domain::error::WorkError;
use crate::domain::{Identifier, Work};

/// Caller-controlled bound on [`await_completion`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Give up after this long; `None` waits as long as the server does.
    pub timeout: Option<Duration>,
}

impl WaitPolicy {
    #[must_use]
    pub fn unbounded() -> Self {
        Self { timeout: None }
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Submit a unit of work against app `app_uid`.
///
/// # Errors
///
/// Returns [`WorkError::Submission`] for an empty or malformed app uid (no
/// network call) or when the server rejects the submission.
pub async fn submit(
    session: &impl ServerSession,
    app_uid: &str,
    params: &WorkParameters,
) -> Result<Identifier> {
    let app = Identifier::parse(app_uid.trim()).map_err(|_| WorkError::Submission {
        app: app_uid.to_string(),
        reason: "app uid is empty or malformed".to_string(),
    })?;
    debug!(app = %app, params = ?params, "submitting work");
    session
        .submit_work(&app, params)
        .await
        .with_context(|| format!("submitting work to app {app}"))
}

/// Single snapshot of a work's status.
///
/// # Errors
///
/// Returns [`WorkError::NotFound`] when the server has no record of `uid`.
pub async fn fetch_status(session: &impl ServerSession, uid: &Identifier) -> Result<Work> {
    let record = session
        .get_by_uid(uid)
        .await
        .with_context(|| format!("fetching work {uid}"))?;
    debug!(record = %record.to_value(), "work record");
    Ok(Work::from_record(uid, &record)?)
}

/// Wait until `uid` reaches a terminal status.
///
/// A non-`COMPLETED` terminal status is returned as a normal result. The
/// future may be dropped at any time to cancel the wait.
///
/// # Errors
///
/// Returns [`WorkError::WaitTimedOut`] when `policy.timeout` expires and
/// [`WorkError::NotFound`] when the work vanishes.
pub async fn await_completion(
    session: &impl ServerSession,
    uid: &Identifier,
    policy: WaitPolicy,
) -> Result<Work> {
    let wait = session.wait_for_work(uid);
    let record = match policy.timeout {
        Some(limit) => tokio::time::timeout(limit, wait)
            .await
            .map_err(|_| WorkError::WaitTimedOut {
                uid: uid.to_string(),
                seconds: limit.as_secs(),
            })?,
        None => wait.await,
    }
    .with_context(|| format!("waiting for work {uid}"))?;

    let work = Work::from_record(uid, &record)?;
    if !work.status.is_terminal() {
        debug!(status = %work.status, "wait returned a non-terminal status");
    }
    Ok(work)
}
