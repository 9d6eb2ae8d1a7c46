//! Filesystem infrastructure — implements the `ProjectFiles` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{LocalArtifact, ProjectFiles};

/// Directory holding app binaries, relative to the project root.
pub const APPS_DIR: &str = "apps";

/// Project files rooted at the project directory.
pub struct LocalProjectFiles {
    root: PathBuf,
}

impl LocalProjectFiles {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ProjectFiles for LocalProjectFiles {
    type Sink = tokio::fs::File;

    fn app_binary_path(&self, app_name: &str) -> PathBuf {
        self.root.join(APPS_DIR).join(app_name)
    }

    async fn read_artifact(&self, path: &Path) -> Result<LocalArtifact> {
        let full = self.resolve(path);
        let metadata = tokio::fs::metadata(&full)
            .await
            .with_context(|| format!("cannot stat {}", full.display()))?;
        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", full.display());
        }
        let payload = tokio::fs::read(&full)
            .await
            .with_context(|| format!("cannot read {}", full.display()))?;
        let name = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", full.display()))?;
        Ok(LocalArtifact {
            payload,
            size: metadata.len(),
            name,
        })
    }

    async fn create_result(&self, file_name: &str) -> Result<(PathBuf, Self::Sink)> {
        if file_name.contains(['/', '\\']) {
            anyhow::bail!("result file name '{file_name}' must not contain a path separator");
        }
        let path = self.root.join(file_name);
        let file = tokio::fs::File::create(&path)
            .await
            .with_context(|| format!("cannot create {}", path.display()))?;
        Ok((path, file))
    }
}
