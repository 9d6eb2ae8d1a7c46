//! Application service — artifact registration.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::{ProjectFiles, ServerSession};
use crate::domain::artifact::{ArtifactMetadata, Identifier, validate_upload};
use crate::domain::session::server_host;
use crate::domain::{ChainEndpoint, XwAddressCodec};

/// Register `payload` as a data artifact.
///
/// Size and metadata are validated locally before any network call.
///
/// # Errors
///
/// Returns `ArtifactError::Validation` for a size mismatch or malformed
/// metadata, `ArtifactError::Upload` on transport failure.
pub async fn register(
    session: &impl ServerSession,
    name: &str,
    payload: &[u8],
    size: u64,
    metadata: &ArtifactMetadata,
) -> Result<Identifier> {
    validate_upload(name, payload, size, metadata)?;
    debug!(name, size, "registering artifact");
    session.register_data(name, payload, metadata).await
}

/// Read a local file and register it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or registration fails.
pub async fn register_file(
    session: &impl ServerSession,
    files: &impl ProjectFiles,
    path: &Path,
    metadata: &ArtifactMetadata,
) -> Result<Identifier> {
    let artifact = files
        .read_artifact(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    register(
        session,
        &artifact.name,
        &artifact.payload,
        artifact.size,
        metadata,
    )
    .await
}

/// Address codec for artifacts hosted by `endpoint`'s server.
#[must_use]
pub fn codec_for(endpoint: &ChainEndpoint) -> XwAddressCodec {
    XwAddressCodec::new(server_host(&endpoint.server))
}
