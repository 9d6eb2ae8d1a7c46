//! Domain types for xwork configuration.
//!
//! Pure functions only; no I/O.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::application::AppConfig;
use crate::domain::artifact::ArtifactMetadata;
use crate::domain::error::{ConfigError, DeployError};
use crate::domain::session::ChainEndpoint;

// ── Project file ─────────────────────────────────────────────────────────────

/// Project settings stored in `xwork.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// App name: selects `apps/<name>` and `build/contracts/<name>.json`.
    pub name: String,
    /// Application descriptor settings.
    pub app: Option<AppConfig>,
    /// Metadata attached to uploaded artifacts.
    pub data: ArtifactMetadata,
    /// Parameters sent with each work submission.
    pub work: BTreeMap<String, serde_json::Value>,
}

impl ProjectConfig {
    /// Validates the fields every command relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `name` is empty or contains a
    /// path separator.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("`name` must be set".to_string()).into());
        }
        if self.name.contains(['/', '\\']) || self.name == ".." {
            return Err(ConfigError::Invalid(format!(
                "`name` must be a plain file name, got '{}'",
                self.name
            ))
            .into());
        }
        Ok(())
    }

    /// App name to deploy: the CLI override or the configured name.
    #[must_use]
    pub fn app_name<'a>(&'a self, cli_name: Option<&'a str>) -> &'a str {
        cli_name.unwrap_or(&self.name)
    }
}

// ── Chain table ──────────────────────────────────────────────────────────────

/// Chain table stored in `chains.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChainTable {
    pub chains: BTreeMap<String, ChainEndpoint>,
}

impl ChainTable {
    /// Look up a chain by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownChain`] listing the known chains.
    pub fn resolve(&self, name: &str) -> Result<ChainEndpoint, ConfigError> {
        let Some(entry) = self.chains.get(name) else {
            let known: Vec<&str> = self.chains.keys().map(String::as_str).collect();
            return Err(ConfigError::UnknownChain {
                name: name.to_string(),
                known: if known.is_empty() {
                    "(none)".to_string()
                } else {
                    known.join(", ")
                },
            });
        };
        Ok(ChainEndpoint {
            name: name.to_string(),
            ..entry.clone()
        })
    }
}

// ── Contract bindings ────────────────────────────────────────────────────────

/// One deployed instance of the dapp contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkBinding {
    #[serde(default)]
    pub address: String,
}

/// Contract address bound on `chain`'s network.
///
/// # Errors
///
/// Returns [`DeployError::MissingBinding`] when the network has no entry or
/// the address is empty.
pub fn contract_address(
    networks: &BTreeMap<String, NetworkBinding>,
    chain: &ChainEndpoint,
) -> Result<String, DeployError> {
    networks
        .get(&chain.network_id)
        .map(|n| n.address.trim())
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DeployError::MissingBinding {
            chain: chain.name.clone(),
        })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
