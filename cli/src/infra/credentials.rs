//! Infrastructure implementation of the `CredentialStore` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::CredentialStore;
use crate::domain::Credential;
use crate::domain::error::SessionError;

/// Account file name, looked up in the project directory and `~/.xwork/`.
pub const ACCOUNT_FILE: &str = "account.json";

/// Credential lookup: explicit token, then project `account.json`, then
/// the user-wide `~/.xwork/account.json`.
pub struct AccountFileStore {
    token: Option<String>,
    candidates: Vec<PathBuf>,
}

impl AccountFileStore {
    /// Store using `token` (from `XWORK_JWTOKEN`) and the default file chain
    /// rooted at `project_dir`.
    #[must_use]
    pub fn new(token: Option<String>, project_dir: &Path) -> Self {
        let mut candidates = vec![project_dir.join(ACCOUNT_FILE)];
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".xwork").join(ACCOUNT_FILE));
        }
        Self { token, candidates }
    }

    /// Store that only consults `candidates`, in order.
    #[must_use]
    pub fn with_candidates(token: Option<String>, candidates: Vec<PathBuf>) -> Self {
        Self { token, candidates }
    }
}

impl CredentialStore for AccountFileStore {
    fn load(&self) -> Result<Credential> {
        if let Some(token) = self.token.as_deref().filter(|t| !t.trim().is_empty()) {
            return Ok(Credential::new(token));
        }
        for path in &self.candidates {
            if !path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let credential: Credential = serde_json::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?;
            tracing::debug!(path = %path.display(), "credential loaded");
            return Ok(credential);
        }
        Err(SessionError::NoCredential.into())
    }
}
