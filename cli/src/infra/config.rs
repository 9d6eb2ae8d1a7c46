//! Infrastructure for project configuration: `xwork.yaml` and the
//! `ChainRegistry` port over `chains.yaml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::application::ports::ChainRegistry;
use crate::domain::{ChainEndpoint, ChainTable, ProjectConfig};

/// Project settings file name.
pub const PROJECT_FILE: &str = "xwork.yaml";
/// Chain table file name.
pub const CHAINS_FILE: &str = "chains.yaml";

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}

/// Load and validate `<project_dir>/xwork.yaml`.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed, or fails validation.
pub fn load_project(project_dir: &Path) -> Result<ProjectConfig> {
    let path = project_dir.join(PROJECT_FILE);
    let config: ProjectConfig = read_yaml(&path)?;
    config
        .validate()
        .with_context(|| format!("invalid {}", path.display()))?;
    Ok(config)
}

/// `ChainRegistry` backed by `<project_dir>/chains.yaml`.
///
/// The file is read on every lookup so edits apply without restarting.
pub struct YamlChainRegistry {
    path: PathBuf,
}

impl YamlChainRegistry {
    #[must_use]
    pub fn new(project_dir: &Path) -> Self {
        Self {
            path: project_dir.join(CHAINS_FILE),
        }
    }
}

impl ChainRegistry for YamlChainRegistry {
    fn resolve(&self, chain: &str) -> Result<ChainEndpoint> {
        let table: ChainTable = read_yaml(&self.path)?;
        Ok(table.resolve(chain)?)
    }
}
