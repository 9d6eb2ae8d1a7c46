//! Application service — application deployment use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::{ProgressReporter, ProjectFiles, ServerSession};
use crate::application::services::artifact;
use crate::domain::error::{ArtifactError, DeployError};
use crate::domain::record::APP_ENTITY;
use crate::domain::{
    AddressCodec, AppConfig, ApplicationDescriptor, ArtifactMetadata, BinaryReference,
    Identifier, binary_field_name,
};

/// Inputs for one deployment.
pub struct DeployRequest<'a> {
    /// Chain the contract lives on (for error messages).
    pub chain: &'a str,
    /// App name: selects the binary under `apps/`.
    pub app_name: &'a str,
    /// Dapp contract address the app is bound to.
    pub contract_address: &'a str,
    /// User application settings.
    pub app: &'a AppConfig,
    /// Metadata for the uploaded binary.
    pub data: &'a ArtifactMetadata,
}

/// Deploy an application bound to `req.contract_address`.
///
/// Non-`DOCKER` apps upload `apps/<app_name>` first and reference it under
/// the platform field. After registration the stored record is read back;
/// a record without an `app` entity means the name was already taken.
///
/// # Errors
///
/// - [`DeployError::MissingBinding`] for an empty contract address, before
///   any server call.
/// - [`ArtifactError::UnsupportedPlatform`] / `Validation` / `Upload` from
///   the binary upload.
/// - [`DeployError::NameCollision`] when the name already exists.
pub async fn deploy(
    session: &impl ServerSession,
    codec: &impl AddressCodec,
    files: &impl ProjectFiles,
    req: &DeployRequest<'_>,
    reporter: &impl ProgressReporter,
) -> Result<Identifier> {
    if req.contract_address.trim().is_empty() {
        return Err(DeployError::MissingBinding {
            chain: req.chain.to_string(),
        }
        .into());
    }

    let binary = if req.app.is_docker() {
        debug!("app type is DOCKER, skipping binary upload");
        None
    } else {
        Some(upload_binary(session, codec, files, req, reporter).await?)
    };

    let descriptor = ApplicationDescriptor::compose(req.contract_address, binary, req.app);
    debug!(descriptor = ?descriptor, "registering app");
    reporter.step("registering app descriptor...");
    let app_uid = session
        .register_app(&descriptor)
        .await
        .with_context(|| format!("registering app {}", descriptor.name))?;

    let record = session
        .get_by_uid(&app_uid)
        .await
        .with_context(|| format!("reading back app {app_uid}"))?;
    debug!(record = %record.to_value(), "app record");
    if !record.has_entity(APP_ENTITY) {
        return Err(DeployError::NameCollision {
            name: descriptor.name,
        }
        .into());
    }
    Ok(app_uid)
}

async fn upload_binary(
    session: &impl ServerSession,
    codec: &impl AddressCodec,
    files: &impl ProjectFiles,
    req: &DeployRequest<'_>,
    reporter: &impl ProgressReporter,
) -> Result<BinaryReference> {
    // Resolve the field first so an unsupported platform fails before upload.
    let (os, cpu) = match (req.data.os.as_deref(), req.data.cpu.as_deref()) {
        (Some(os), Some(cpu)) => (os, cpu),
        _ => {
            return Err(ArtifactError::Validation {
                name: req.app_name.to_string(),
                reason: "app binary metadata needs both os and cpu".to_string(),
            }
            .into());
        }
    };
    let field = binary_field_name(os, cpu)?;

    let path = files.app_binary_path(req.app_name);
    debug!(path = %path.display(), "uploading app binary");
    reporter.step(&format!("uploading {}...", path.display()));
    let data_uid = artifact::register_file(session, files, &path, req.data).await?;
    reporter.success(&format!("binary uploaded as {data_uid}"));

    Ok(BinaryReference {
        field: field.to_string(),
        address: codec.encode(&data_uid),
    })
}
