//! Result descriptors and result file naming.

use crate::domain::artifact::Identifier;
use crate::domain::record::{DATA_ENTITY, ServerRecord};

/// Stored result resolved from a result address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDescriptor {
    /// Lower-cased content type, used as the file extension.
    pub content_type: String,
    /// Identifier of the stored payload.
    pub storage_uid: Identifier,
}

/// Extension used when a stored result carries no `type`.
pub const FALLBACK_CONTENT_TYPE: &str = "bin";

impl ResultDescriptor {
    /// Read the content type from a stored `data` record.
    ///
    /// A record without a `type` field gets [`FALLBACK_CONTENT_TYPE`].
    /// Returns `None` when the record holds no `data` entity.
    #[must_use]
    pub fn from_record(storage_uid: &Identifier, record: &ServerRecord) -> Option<Self> {
        if !record.has_entity(DATA_ENTITY) {
            return None;
        }
        let content_type = record
            .field(DATA_ENTITY, "type")
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_lowercase();
        Some(Self {
            content_type,
            storage_uid: storage_uid.clone(),
        })
    }
}

/// Where `fetch_result` saves the result payload, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveTarget {
    /// Only report the result address.
    #[default]
    Skip,
    /// Save to a file named after the work uid.
    WorkUid,
    /// Save to a file with this base name.
    Named(String),
}

impl SaveTarget {
    /// Map the CLI `--save [NAME]` option onto a target.
    #[must_use]
    pub fn from_flag(flag: Option<Option<String>>) -> Self {
        match flag {
            None => Self::Skip,
            Some(None) => Self::WorkUid,
            Some(Some(name)) if name.is_empty() => Self::WorkUid,
            Some(Some(name)) => Self::Named(name),
        }
    }

    /// File name for the saved result, or `None` for [`SaveTarget::Skip`].
    ///
    /// The extension always comes from the content type, never from the
    /// caller-supplied name.
    #[must_use]
    pub fn file_name(&self, work_uid: &Identifier, content_type: &str) -> Option<String> {
        let base = match self {
            Self::Skip => return None,
            Self::WorkUid => work_uid.as_str(),
            Self::Named(name) => name.as_str(),
        };
        Some(format!("{base}.{content_type}"))
    }
}
