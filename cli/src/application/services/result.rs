//! Application service — result resolution and download.

use std::path::PathBuf;

use anyhow::{Context, Result};
use futures_util::StreamExt as _;
use tokio::io::{AsyncWrite, AsyncWriteExt as _};
use tracing::debug;

use crate::application::ports::{ProjectFiles, ServerSession};
use crate::domain::error::ResultError;
use crate::domain::record::DATA_ENTITY;
use crate::domain::result::FALLBACK_CONTENT_TYPE;
use crate::domain::{Address, AddressCodec, Identifier, ResultDescriptor};

/// Resolve a result address to its stored payload and content type.
///
/// # Errors
///
/// Returns `ArtifactError::MalformedAddress` for an undecodable address and
/// [`ResultError::NotFound`] when no data record exists.
pub async fn resolve(
    session: &impl ServerSession,
    codec: &impl AddressCodec,
    address: &Address,
) -> Result<ResultDescriptor> {
    let storage_uid = codec.decode(address)?;
    let record = session
        .get_by_uid(&storage_uid)
        .await
        .with_context(|| format!("fetching result record {storage_uid}"))?;
    if record.has_entity(DATA_ENTITY) && record.field(DATA_ENTITY, "type").is_none() {
        debug!(uid = %storage_uid, fallback = FALLBACK_CONTENT_TYPE, "result record has no type");
    }
    ResultDescriptor::from_record(&storage_uid, &record).ok_or_else(|| {
        ResultError::NotFound {
            uid: storage_uid.to_string(),
        }
        .into()
    })
}

/// Stream the payload of `uid` into `sink`.
///
/// The sink is shut down (flushed and closed) on every path, including a
/// transport failure mid-stream. `dest` only labels errors.
///
/// # Errors
///
/// Returns [`ResultError::NotFound`] for a stale uid and [`ResultError::Io`]
/// when writing to the sink fails.
pub async fn download<W: AsyncWrite + Unpin>(
    session: &impl ServerSession,
    uid: &Identifier,
    sink: &mut W,
    dest: &str,
) -> Result<u64> {
    let io_err = |source| ResultError::Io {
        path: dest.to_string(),
        source,
    };

    let streamed = async {
        let mut chunks = session.download(uid).await?;
        let mut written = 0u64;
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.with_context(|| format!("downloading {uid}"))?;
            sink.write_all(&chunk).await.map_err(io_err)?;
            written += chunk.len() as u64;
        }
        Ok::<u64, anyhow::Error>(written)
    }
    .await;
    let closed = sink.shutdown().await;

    let written = streamed?;
    closed.map_err(io_err)?;
    debug!(uid = %uid, bytes = written, dest, "result downloaded");
    Ok(written)
}

/// Create `file_name` in the project directory and download `result` into it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the download fails.
pub async fn save(
    session: &impl ServerSession,
    files: &impl ProjectFiles,
    result: &ResultDescriptor,
    file_name: &str,
) -> Result<PathBuf> {
    let (path, mut sink) = files
        .create_result(file_name)
        .await
        .with_context(|| format!("creating result file {file_name}"))?;
    download(
        session,
        &result.storage_uid,
        &mut sink,
        &path.display().to_string(),
    )
    .await?;
    Ok(path)
}
