//! Infrastructure implementation of the `ContractBindingStore` port over
//! truffle build artifacts (`build/contracts/<name>.json`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::ContractBindingStore;
use crate::domain::NetworkBinding;

#[derive(Deserialize)]
struct ContractArtifact {
    #[serde(default)]
    networks: BTreeMap<String, NetworkBinding>,
}

/// Reads the `networks` table of a compiled dapp contract.
pub struct TruffleContractStore {
    path: PathBuf,
}

impl TruffleContractStore {
    /// Store for contract `name` inside `project_dir`.
    #[must_use]
    pub fn new(project_dir: &Path, name: &str) -> Self {
        Self {
            path: project_dir
                .join("build")
                .join("contracts")
                .join(format!("{name}.json")),
        }
    }
}

impl ContractBindingStore for TruffleContractStore {
    fn load_networks(&self) -> Result<BTreeMap<String, NetworkBinding>> {
        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!(
                "cannot read {} (has the contract been compiled?)",
                self.path.display()
            )
        })?;
        let artifact: ContractArtifact = serde_json::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))?;
        Ok(artifact.networks)
    }
}
