//! Credential and server endpoint value types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Bearer token exchanged for a server session. Never persisted by the core.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    #[serde(rename = "jwtoken")]
    token: String,
}

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where a chain's work server lives and which network its contracts use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEndpoint {
    /// Chain name as given on the command line.
    #[serde(skip)]
    pub name: String,
    /// Base URL of the work server, e.g. `https://xw.example.org:443`.
    pub server: String,
    /// Network id keying the contract's `networks` table.
    #[serde(deserialize_with = "network_id_text")]
    pub network_id: String,
}

/// Accepts `network_id: 42` as well as `network_id: '42'`.
fn network_id_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(n) => n.to_string(),
    })
}

/// Host part of a server URL, used to build addresses.
///
/// Falls back to the raw string when it does not parse as a URL.
#[must_use]
pub fn server_host(server: &str) -> String {
    let without_scheme = server.split_once("://").map_or(server, |(_, rest)| rest);
    let authority = without_scheme.split('/').next().unwrap_or(without_scheme);
    authority
        .rsplit_once(':')
        .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
        .map_or(authority, |(host, _)| host)
        .to_string()
}
