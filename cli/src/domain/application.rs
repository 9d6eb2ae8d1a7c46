//! Application descriptor composition.
//!
//! Pure functions only; no I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::artifact::Address;

/// App type whose binary is a pre-built container image (no upload).
pub const DOCKER_APP_TYPE: &str = "DOCKER";

/// User-supplied application settings from the project file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application type, e.g. `DEPLOYABLE` or `DOCKER`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Remaining descriptor fields passed through to the server.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl AppConfig {
    /// `true` when the app refers to a pre-built container image.
    #[must_use]
    pub fn is_docker(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| k.eq_ignore_ascii_case(DOCKER_APP_TYPE))
    }
}

/// Platform-specific binary reference stored in an app descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryReference {
    /// Descriptor key, e.g. `linux_amd64uri`.
    pub field: String,
    /// Address of the registered binary.
    pub address: Address,
}

/// Descriptor submitted to register an application.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDescriptor {
    /// Unique app name: the bound contract address.
    pub name: String,
    /// Present only when a binary was uploaded.
    pub binary: Option<BinaryReference>,
    /// User metadata, including `type`.
    pub metadata: BTreeMap<String, Value>,
}

impl ApplicationDescriptor {
    /// Compose a descriptor. The contract address always becomes `name`,
    /// overriding any `name` in the user metadata.
    #[must_use]
    pub fn compose(
        contract_address: &str,
        binary: Option<BinaryReference>,
        app: &AppConfig,
    ) -> Self {
        let mut metadata = app.metadata.clone();
        metadata.remove("name");
        if let Some(kind) = &app.kind {
            metadata.insert("type".to_string(), Value::String(kind.clone()));
        }
        Self {
            name: contract_address.to_string(),
            binary,
            metadata,
        }
    }

    /// Flatten into the JSON object sent to the server.
    #[must_use]
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields: Map<String, Value> = self
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(bin) = &self.binary {
            fields.insert(bin.field.clone(), Value::String(bin.address.to_string()));
        }
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        fields
    }
}
