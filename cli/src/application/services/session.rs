//! Application service — session establishment.
//!
//! A fresh session is opened for every top-level operation; sessions are
//! never cached or shared.

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::{ChainRegistry, CredentialStore, ServerConnector};
use crate::domain::error::SessionError;
use crate::domain::{ChainEndpoint, Credential};

/// Exchange `credential` for a session on `endpoint`.
///
/// # Errors
///
/// Returns [`SessionError::Auth`] for an empty credential (without touching
/// the network) or when the server rejects the exchange.
pub async fn establish<C: ServerConnector>(
    connector: &C,
    endpoint: &ChainEndpoint,
    credential: &Credential,
) -> Result<C::Session> {
    if credential.is_empty() {
        return Err(SessionError::Auth {
            server: endpoint.server.clone(),
            reason: "empty credential".to_string(),
        }
        .into());
    }
    debug!(chain = %endpoint.name, server = %endpoint.server, "establishing session");
    connector.connect(endpoint, credential).await
}

/// Resolve `chain`, load the credential, and establish a session.
///
/// # Errors
///
/// Propagates `UnknownChain`, `NoCredential`, and `Auth` failures.
pub async fn open<C: ServerConnector>(
    chains: &impl ChainRegistry,
    credentials: &impl CredentialStore,
    connector: &C,
    chain: &str,
) -> Result<(ChainEndpoint, C::Session)> {
    let endpoint = chains.resolve(chain)?;
    debug!(server = %endpoint.server, "chain resolved");
    let credential = credentials.load()?;
    let session = establish(connector, &endpoint, &credential)
        .await
        .with_context(|| format!("opening session on chain {chain}"))?;
    Ok((endpoint, session))
}
