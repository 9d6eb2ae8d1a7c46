//! Artifact identifiers, addresses, metadata, and the platform field table.
//!
//! Pure functions only; no I/O.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::ArtifactError;

// ── Identifier ───────────────────────────────────────────────────────────────

/// Opaque server-scoped handle of a registered artifact, app, or work.
///
/// The identifier space is every non-empty string without `/` or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap a raw uid.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidIdentifier`] if `raw` is empty or
    /// contains `/` or whitespace.
    pub fn parse(raw: &str) -> Result<Self, ArtifactError> {
        if raw.is_empty() || raw.contains('/') || raw.chars().any(char::is_whitespace) {
            return Err(ArtifactError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identifier {
    type Error = ArtifactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

// ── Address ──────────────────────────────────────────────────────────────────

/// Externally shareable, reversible encoding of an [`Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap a raw address string. Grammar checks happen in [`AddressCodec::decode`].
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bijection between identifiers and addresses.
///
/// The address grammar is defined by the server, so the codec is a seam:
/// [`XwAddressCodec`] covers the `xw://<host>/<uid>` form.
pub trait AddressCodec {
    /// Encode an identifier. Total over the identifier space.
    fn encode(&self, id: &Identifier) -> Address;

    /// Decode an address produced by [`AddressCodec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::MalformedAddress`] if `address` does not match
    /// the codec's grammar.
    fn decode(&self, address: &Address) -> Result<Identifier, ArtifactError>;
}

/// Scheme prefix of addresses issued by the work server.
pub const XW_SCHEME: &str = "xw://";

/// `xw://<host>/<uid>` codec bound to one server host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XwAddressCodec {
    host: String,
}

impl XwAddressCodec {
    /// Build a codec for the given server host (no scheme, no path).
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl AddressCodec for XwAddressCodec {
    fn encode(&self, id: &Identifier) -> Address {
        Address(format!("{XW_SCHEME}{}/{}", self.host, id.as_str()))
    }

    fn decode(&self, address: &Address) -> Result<Identifier, ArtifactError> {
        let malformed = |reason: &str| ArtifactError::MalformedAddress {
            address: address.as_str().to_string(),
            reason: reason.to_string(),
        };
        let rest = address
            .as_str()
            .strip_prefix(XW_SCHEME)
            .ok_or_else(|| malformed("expected xw:// scheme"))?;
        // Results may live on another server than the one we talk to, so the
        // host is only required to be present.
        let (host, uid) = rest
            .rsplit_once('/')
            .ok_or_else(|| malformed("missing uid path segment"))?;
        if host.is_empty() {
            return Err(malformed("missing host"));
        }
        Identifier::parse(uid).map_err(|_| malformed("invalid uid"))
    }
}

// ── Metadata ─────────────────────────────────────────────────────────────────

/// Metadata record registered alongside an artifact payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Artifact type, e.g. `BINARY`, `TEXT`, `ZIP`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Target operating system, required for binaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    /// Target CPU, required for binaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    /// Any other server-understood field (access rights, name, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ArtifactMetadata {
    /// `true` when the artifact type denotes an executable binary.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| k.eq_ignore_ascii_case("BINARY"))
    }
}

/// Validate an upload before any network call.
///
/// # Errors
///
/// Returns [`ArtifactError::Validation`] when the declared size differs from
/// the payload length, the type is missing, or a binary lacks OS/CPU.
pub fn validate_upload(
    name: &str,
    payload: &[u8],
    size: u64,
    meta: &ArtifactMetadata,
) -> Result<(), ArtifactError> {
    let invalid = |reason: String| ArtifactError::Validation {
        name: name.to_string(),
        reason,
    };
    if payload.len() as u64 != size {
        return Err(invalid(format!(
            "declared size {size} does not match payload length {}",
            payload.len()
        )));
    }
    if meta.kind.as_deref().is_none_or(str::is_empty) {
        return Err(invalid("metadata is missing a type".to_string()));
    }
    if meta.is_binary() {
        if meta.os.as_deref().is_none_or(str::is_empty) {
            return Err(invalid("binary metadata is missing os".to_string()));
        }
        if meta.cpu.as_deref().is_none_or(str::is_empty) {
            return Err(invalid("binary metadata is missing cpu".to_string()));
        }
    }
    Ok(())
}

// ── Platform table ───────────────────────────────────────────────────────────

/// Supported `(os, cpu)` pairs and the app descriptor field holding the
/// binary for that platform. `JAVA` ignores the CPU.
pub const PLATFORM_FIELDS: &[(&str, &str, &str)] = &[
    ("LINUX", "IX86", "linux_ix86uri"),
    ("LINUX", "PPC", "linux_ppcuri"),
    ("LINUX", "AMD64", "linux_amd64uri"),
    ("LINUX", "X86_64", "linux_x86_64uri"),
    ("LINUX", "IA64", "linux_ia64uri"),
    ("WIN32", "IX86", "win32_ix86uri"),
    ("WIN32", "AMD64", "win32_amd64uri"),
    ("WIN32", "X86_64", "win32_x86_64uri"),
    ("MACOSX", "IX86", "macos_ix86uri"),
    ("MACOSX", "X86_64", "macos_x86_64uri"),
    ("MACOSX", "PPC", "macos_ppcuri"),
];

/// Field name used for Java binaries regardless of CPU.
pub const JAVA_FIELD: &str = "javauri";

/// Descriptor key under which a binary for `(os, cpu)` is stored.
///
/// # Errors
///
/// Returns [`ArtifactError::UnsupportedPlatform`] for pairs outside
/// [`PLATFORM_FIELDS`].
pub fn binary_field_name(os: &str, cpu: &str) -> Result<&'static str, ArtifactError> {
    let os_upper = os.to_ascii_uppercase();
    let cpu_upper = cpu.to_ascii_uppercase();
    if os_upper == "JAVA" {
        return Ok(JAVA_FIELD);
    }
    PLATFORM_FIELDS
        .iter()
        .find(|(o, c, _)| *o == os_upper && *c == cpu_upper)
        .map(|(_, _, field)| *field)
        .ok_or(ArtifactError::UnsupportedPlatform {
            os: os_upper,
            cpu: cpu_upper,
        })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
