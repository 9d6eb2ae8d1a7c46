//! Server record envelope.
//!
//! Every read from the work server returns an envelope keyed by entity kind
//! (`app`, `data`, `work`, `Version`, ...). An envelope without the expected
//! entity means the server holds no such object for the uid.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entity kind of a registered application.
pub const APP_ENTITY: &str = "app";
/// Entity kind of a registered data artifact.
pub const DATA_ENTITY: &str = "data";
/// Entity kind of a unit of work.
pub const WORK_ENTITY: &str = "work";

/// Decoded `{"xwhep": {<kind>: {<field>: ...}}}` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    #[serde(rename = "xwhep", default)]
    entities: Map<String, Value>,
}

impl ServerRecord {
    /// Build a record holding a single entity (used by fakes and tests).
    #[must_use]
    pub fn with_entity(kind: &str, fields: Value) -> Self {
        let mut entities = Map::new();
        entities.insert(kind.to_string(), fields);
        Self { entities }
    }

    /// An envelope with no entity at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_entity(&self, kind: &str) -> bool {
        self.entities.contains_key(kind)
    }

    /// String value of `field` inside entity `kind`.
    ///
    /// Accepts both plain values and the single-element arrays produced by
    /// XML-to-JSON conversion on the server side.
    #[must_use]
    pub fn field(&self, kind: &str, field: &str) -> Option<&str> {
        let entity = unwrap_singleton(self.entities.get(kind)?);
        unwrap_singleton(entity.get(field)?).as_str()
    }

    /// Raw JSON of the whole envelope.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "xwhep": self.entities })
    }
}

fn unwrap_singleton(value: &Value) -> &Value {
    match value {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    }
}
