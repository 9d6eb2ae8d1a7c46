//! Process settings loaded from `XWORK_*` environment variables via `envy`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable prefix shared by every setting.
pub const ENV_PREFIX: &str = "XWORK_";

/// Runtime settings.
///
/// Each field maps to `XWORK_<FIELD>`:
///   - `XWORK_PROJECT_DIR`   (default: current directory)
///   - `XWORK_JWTOKEN`       (optional credential override)
///   - `XWORK_WAIT_TIMEOUT`  (optional, seconds; unset waits forever)
///   - `XWORK_POLL_INTERVAL` (default `5`, seconds)
///   - `XWORK_HTTP_TIMEOUT`  (default `30`, seconds)
///
/// No `Debug` derive: `jwtoken` must never reach a log line.
#[derive(Deserialize, Clone)]
pub struct Settings {
    /// Project directory holding `xwork.yaml`, `chains.yaml`, `apps/`.
    pub project_dir: Option<PathBuf>,

    /// Bearer credential, takes precedence over `account.json`.
    pub jwtoken: Option<String>,

    /// Upper bound for `result --watch`, in seconds.
    pub wait_timeout: Option<u64>,

    /// Delay between work status polls, in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout: u64,
}

fn default_poll_interval() -> u64 {
    5
}

fn default_http_timeout() -> u64 {
    30
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        envy::prefixed(ENV_PREFIX)
            .from_env()
            .context("failed to load settings from XWORK_* env vars")
    }

    /// Load settings from an explicit key/value iterator (used in tests).
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .context("failed to parse XWORK_* settings")
    }

    /// Resolved project directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the current
    /// directory cannot be determined.
    pub fn project_dir(&self) -> Result<PathBuf> {
        match &self.project_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("cannot determine current directory"),
        }
    }

    #[must_use]
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout.map(Duration::from_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout.max(1))
    }
}
