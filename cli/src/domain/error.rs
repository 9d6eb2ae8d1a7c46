//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Callers that need to branch on the failure kind use
//! [`error_code`] or `anyhow::Error::downcast_ref`.

use thiserror::Error;

// ── Session errors ────────────────────────────────────────────────────────────

/// Errors raised while obtaining a credential or exchanging it for a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No credential found. Set XWORK_JWTOKEN or create account.json with a \"jwtoken\" field.")]
    NoCredential,

    #[error("Authentication with {server} failed: {reason}")]
    Auth { server: String, reason: String },
}

// ── Artifact errors ───────────────────────────────────────────────────────────

/// Errors related to artifact registration and addressing.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Upload of {name} failed: {reason}")]
    Upload { name: String, reason: String },

    #[error("Invalid artifact {name}: {reason}")]
    Validation { name: String, reason: String },

    #[error("OS {os} & CPU {cpu} not supported")]
    UnsupportedPlatform { os: String, cpu: String },

    #[error("Malformed address '{address}': {reason}")]
    MalformedAddress { address: String, reason: String },

    #[error("Invalid identifier '{0}': must be non-empty without '/' or whitespace")]
    InvalidIdentifier(String),
}

// ── Deploy errors ─────────────────────────────────────────────────────────────

/// Errors related to application deployment.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(
        "App name {name} already exists on the work server. Please change the name before re-deploying."
    )]
    NameCollision { name: String },

    #[error("Missing dapp address for {chain}. Migrate the contract before sending the app.")]
    MissingBinding { chain: String },
}

// ── Work errors ───────────────────────────────────────────────────────────────

/// Errors related to work submission and tracking.
#[derive(Debug, Error)]
pub enum WorkError {
    #[error("Work submission to app '{app}' failed: {reason}")]
    Submission { app: String, reason: String },

    #[error("No current work associated with workUID: {uid}")]
    NotFound { uid: String },

    #[error("Work {uid} is not completed (status: {status})")]
    NotCompleted { uid: String, status: String },

    #[error("Gave up waiting for work {uid} after {seconds}s")]
    WaitTimedOut { uid: String, seconds: u64 },

    #[error("Stopped waiting for work {uid}")]
    Cancelled { uid: String },
}

// ── Result errors ─────────────────────────────────────────────────────────────

/// Errors related to resolving and downloading work results.
#[derive(Debug, Error)]
pub enum ResultError {
    #[error("No stored result for uid {uid}")]
    NotFound { uid: String },

    #[error("Cannot write result to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to local configuration (chains, project file).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown chain: {name}\n\nKnown chains: {known}")]
    UnknownChain { name: String, known: String },

    #[error("Invalid project configuration: {0}")]
    Invalid(String),
}

// ── Remote errors ─────────────────────────────────────────────────────────────

/// Failure reported by the server for an operation that has no finer mapping.
#[derive(Debug, Error)]
#[error("{operation} failed on the work server: {reason}")]
pub struct RemoteError {
    pub operation: String,
    pub reason: String,
}

/// Stable machine-readable code for an error chain, used by `--json` output.
///
/// Walks the chain and returns the code of the first typed domain error,
/// or `"ERROR"` when none is present.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<SessionError>() {
            return match e {
                SessionError::NoCredential => "NO_CREDENTIAL",
                SessionError::Auth { .. } => "AUTH",
            };
        }
        if let Some(e) = cause.downcast_ref::<ArtifactError>() {
            return match e {
                ArtifactError::Upload { .. } => "UPLOAD",
                ArtifactError::Validation { .. } | ArtifactError::InvalidIdentifier(_) => {
                    "VALIDATION"
                }
                ArtifactError::UnsupportedPlatform { .. } => "UNSUPPORTED_PLATFORM",
                ArtifactError::MalformedAddress { .. } => "MALFORMED_ADDRESS",
            };
        }
        if let Some(e) = cause.downcast_ref::<DeployError>() {
            return match e {
                DeployError::NameCollision { .. } => "NAME_COLLISION",
                DeployError::MissingBinding { .. } => "MISSING_BINDING",
            };
        }
        if let Some(e) = cause.downcast_ref::<WorkError>() {
            return match e {
                WorkError::Submission { .. } => "SUBMISSION",
                WorkError::NotFound { .. } => "NOT_FOUND",
                WorkError::NotCompleted { .. } => "NOT_COMPLETED",
                WorkError::WaitTimedOut { .. } => "TIMEOUT",
                WorkError::Cancelled { .. } => "CANCELLED",
            };
        }
        if let Some(e) = cause.downcast_ref::<ResultError>() {
            return match e {
                ResultError::NotFound { .. } => "NOT_FOUND",
                ResultError::Io { .. } => "IO",
            };
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return match e {
                ConfigError::UnknownChain { .. } => "UNKNOWN_CHAIN",
                ConfigError::Invalid(_) => "CONFIG",
            };
        }
        if cause.downcast_ref::<RemoteError>().is_some() {
            return "REMOTE";
        }
    }
    "ERROR"
}
