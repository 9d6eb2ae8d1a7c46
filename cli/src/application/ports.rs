//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use futures_util::stream::BoxStream;
use serde_json::Value;
use tokio::io::AsyncWrite;

use crate::domain::{
    ApplicationDescriptor, ArtifactMetadata, ChainEndpoint, Credential, Identifier,
    NetworkBinding, ServerRecord,
};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Artifact bytes read from local storage together with their on-disk size.
pub struct LocalArtifact {
    /// File contents.
    pub payload: Vec<u8>,
    /// Size reported by the filesystem.
    pub size: u64,
    /// File name, used as the artifact name on the server.
    pub name: String,
}

/// Stream of downloaded payload chunks.
pub type ByteChunks = BoxStream<'static, Result<Vec<u8>>>;

/// Work parameters sent with a submission.
pub type WorkParameters = BTreeMap<String, Value>;

// ── Configuration Ports ───────────────────────────────────────────────────────

/// Source of the user's bearer credential.
pub trait CredentialStore {
    /// Load the credential.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoCredential` when none is configured.
    fn load(&self) -> Result<Credential>;
}

/// Chain name → server endpoint lookup.
pub trait ChainRegistry {
    /// Resolve a chain by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownChain` for unknown names.
    fn resolve(&self, chain: &str) -> Result<ChainEndpoint>;
}

/// Deployed instances of the dapp contract, keyed by network id.
pub trait ContractBindingStore {
    /// Load the contract's `networks` table.
    fn load_networks(&self) -> Result<BTreeMap<String, NetworkBinding>>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Local project files: artifacts to upload and result files to write.
#[allow(async_fn_in_trait)]
pub trait ProjectFiles {
    /// Writable handle for a result file.
    type Sink: AsyncWrite + Unpin;

    /// Path of the binary for app `app_name` (`apps/<app_name>`).
    fn app_binary_path(&self, app_name: &str) -> PathBuf;

    /// Read an artifact and its size.
    async fn read_artifact(&self, path: &Path) -> Result<LocalArtifact>;

    /// Create (truncate) a result file in the project directory.
    async fn create_result(&self, file_name: &str) -> Result<(PathBuf, Self::Sink)>;
}

// ── Server Ports ──────────────────────────────────────────────────────────────

/// Exchanges a credential for an authenticated session.
#[allow(async_fn_in_trait)]
pub trait ServerConnector {
    type Session: ServerSession;

    /// Authenticate against `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Auth` if the server rejects the credential.
    async fn connect(
        &self,
        endpoint: &ChainEndpoint,
        credential: &Credential,
    ) -> Result<Self::Session>;
}

/// Operations available on an authenticated work-server session.
#[allow(async_fn_in_trait)]
pub trait ServerSession {
    /// Register a data artifact and upload its payload.
    async fn register_data(
        &self,
        name: &str,
        payload: &[u8],
        metadata: &ArtifactMetadata,
    ) -> Result<Identifier>;

    /// Register an application descriptor.
    async fn register_app(&self, descriptor: &ApplicationDescriptor) -> Result<Identifier>;

    /// Fetch the record stored under `uid`. An unknown uid yields an empty
    /// envelope rather than an error.
    async fn get_by_uid(&self, uid: &Identifier) -> Result<ServerRecord>;

    /// Submit a unit of work against a deployed app.
    async fn submit_work(&self, app: &Identifier, params: &WorkParameters) -> Result<Identifier>;

    /// Block until the work reaches a terminal status (or vanishes) and
    /// return its record.
    async fn wait_for_work(&self, uid: &Identifier) -> Result<ServerRecord>;

    /// Stream the payload stored under `uid`.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::NotFound` for a stale uid.
    async fn download(&self, uid: &Identifier) -> Result<ByteChunks>;

    /// Server version string.
    async fn version(&self) -> Result<String>;

    /// Invoke a named server operation with positional arguments.
    async fn call(&self, operation: &str, args: &[String]) -> Result<Value>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Synchronous.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
