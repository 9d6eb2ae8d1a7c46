//! Application service — generic named-operation passthrough.
//!
//! This is the least safe entry point of the client: neither the operation
//! name nor its arguments are checked locally, and the server's JSON answer
//! is returned untouched. Use it only for server operations that have no
//! typed service of their own.

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::application::ports::ServerSession;

/// Forward `operation(args...)` to the session and return the raw result.
///
/// # Errors
///
/// Returns whatever `RemoteError` the session raises for an unknown
/// operation or bad arguments.
pub async fn invoke(
    session: &impl ServerSession,
    operation: &str,
    args: &[String],
) -> Result<Value> {
    debug!(operation, args = ?args, "invoking named operation");
    session.call(operation, args).await
}

/// Human-readable call signature, e.g. `getByUID(abc123)`.
#[must_use]
pub fn signature(operation: &str, args: &[String]) -> String {
    format!("{operation}({})", args.join(", "))
}
