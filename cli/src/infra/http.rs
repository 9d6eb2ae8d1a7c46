//! Work-server adapter over HTTP — implements `ServerConnector` and
//! `ServerSession` with `reqwest`.
//!
//! Request layout:
//!   - `GET  /ethauthverify?jwt=<token>`   credential → session cookie
//!   - `POST /senddata`, `/sendapp`, `/sendwork` with a `{<kind>: {...}}` body
//!   - `POST /uploaddata/<uid>`            raw artifact bytes
//!   - `GET  /get/<uid>`                   `{"xwhep": {...}}` record envelope
//!   - `GET  /downloaddata/<uid>`          streamed payload
//!   - `GET  /version`
//!
//! URLs carrying the token are never logged, and transport errors are
//! stripped of their URL before they surface.

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::StreamExt as _;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::application::ports::{ByteChunks, ServerConnector, ServerSession, WorkParameters};
use crate::domain::error::{
    ArtifactError, DeployError, RemoteError, ResultError, SessionError, WorkError,
};
use crate::domain::record::WORK_ENTITY;
use crate::domain::{
    ApplicationDescriptor, ArtifactMetadata, ChainEndpoint, Credential, Identifier, ServerRecord,
    WorkStatus,
};

/// Status given to freshly submitted work.
const PENDING_STATUS: &str = "PENDING";

/// Builds authenticated [`HttpSession`]s.
pub struct HttpConnector {
    client: Client,
    request_timeout: Duration,
    poll_interval: Duration,
}

impl HttpConnector {
    /// Create a connector.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(request_timeout: Duration, poll_interval: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(request_timeout)
            .user_agent(concat!("xwork/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            client,
            request_timeout,
            poll_interval,
        })
    }
}

impl ServerConnector for HttpConnector {
    type Session = HttpSession;

    async fn connect(
        &self,
        endpoint: &ChainEndpoint,
        credential: &Credential,
    ) -> Result<Self::Session> {
        let auth_error = |reason: String| SessionError::Auth {
            server: endpoint.server.clone(),
            reason,
        };
        let base = Url::parse(&endpoint.server)
            .map_err(|e| auth_error(format!("invalid server URL: {e}")))?;
        let mut url = join(&base, &["ethauthverify"])?;
        url.query_pairs_mut().append_pair("jwt", credential.token());

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| auth_error(e.without_url().to_string()))?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(auth_error("credential rejected".to_string()).into());
        }
        if !status.is_success() {
            return Err(auth_error(format!("HTTP {status}")).into());
        }

        let cookie = session_cookie(&response);
        if cookie.is_empty() {
            return Err(auth_error("server issued no session cookie".to_string()).into());
        }
        debug!(server = %endpoint.server, "session established");
        Ok(HttpSession {
            client: self.client.clone(),
            base,
            cookie,
            request_timeout: self.request_timeout,
            poll_interval: self.poll_interval,
        })
    }
}

/// Authenticated session. Holds the cookie for its own lifetime only.
pub struct HttpSession {
    client: Client,
    base: Url,
    cookie: String,
    request_timeout: Duration,
    poll_interval: Duration,
}

impl HttpSession {
    fn url(&self, segments: &[&str]) -> Result<Url> {
        join(&self.base, segments)
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .header(COOKIE, &self.cookie)
            .send()
            .await
            .map_err(|e| RemoteError {
                operation: operation.to_string(),
                reason: e.without_url().to_string(),
            })?;
        Ok(response)
    }

    async fn get(&self, operation: &str, segments: &[&str]) -> Result<Response> {
        let url = self.url(segments)?;
        self.send(operation, self.client.get(url).timeout(self.request_timeout))
            .await
    }

    async fn post_json(&self, operation: &str, segment: &str, body: &Value) -> Result<Response> {
        let url = self.url(&[segment])?;
        self.send(
            operation,
            self.client
                .post(url)
                .timeout(self.request_timeout)
                .json(body),
        )
        .await
    }

    async fn upload_payload(
        &self,
        uid: &Identifier,
        name: &str,
        payload: &[u8],
        metadata: &ArtifactMetadata,
    ) -> Result<()> {
        let mut fields = match serde_json::to_value(metadata)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        fields.insert("uid".to_string(), json!(uid.as_str()));
        fields.insert("name".to_string(), json!(name));
        fields.insert("size".to_string(), json!(payload.len()));
        fields.insert("checksum".to_string(), json!(sha256_hex(payload)));
        let response = self
            .post_json("senddata", "senddata", &json!({ "data": fields }))
            .await?;
        success_or_remote("senddata", response).await?;

        let url = self.url(&["uploaddata", uid.as_str()])?;
        let response = self
            .send(
                "uploaddata",
                self.client
                    .post(url)
                    .timeout(self.request_timeout)
                    .body(payload.to_vec()),
            )
            .await?;
        success_or_remote("uploaddata", response).await?;
        Ok(())
    }
}

impl ServerSession for HttpSession {
    async fn register_data(
        &self,
        name: &str,
        payload: &[u8],
        metadata: &ArtifactMetadata,
    ) -> Result<Identifier> {
        let uid = new_uid()?;
        debug!(uid = %uid, name, bytes = payload.len(), "registering data");
        self.upload_payload(&uid, name, payload, metadata)
            .await
            .map_err(|e| ArtifactError::Upload {
                name: name.to_string(),
                reason: format!("{e:#}"),
            })?;
        Ok(uid)
    }

    async fn register_app(&self, descriptor: &ApplicationDescriptor) -> Result<Identifier> {
        let uid = new_uid()?;
        let mut fields = descriptor.to_fields();
        fields.insert("uid".to_string(), json!(uid.as_str()));
        let response = self
            .post_json("sendapp", "sendapp", &json!({ "app": fields }))
            .await?;
        if response.status() == StatusCode::CONFLICT {
            return Err(DeployError::NameCollision {
                name: descriptor.name.clone(),
            }
            .into());
        }
        success_or_remote("sendapp", response).await?;
        Ok(uid)
    }

    async fn get_by_uid(&self, uid: &Identifier) -> Result<ServerRecord> {
        let response = self.get("get", &["get", uid.as_str()]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(ServerRecord::empty());
        }
        let response = success_or_remote("get", response).await?;
        let text = response.text().await.context("reading record body")?;
        if text.trim().is_empty() {
            return Ok(ServerRecord::empty());
        }
        serde_json::from_str(&text).with_context(|| format!("decoding record {uid}"))
    }

    async fn submit_work(&self, app: &Identifier, params: &WorkParameters) -> Result<Identifier> {
        let uid = new_uid()?;
        let mut fields: Map<String, Value> =
            params.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        fields.insert("uid".to_string(), json!(uid.as_str()));
        fields.insert("appuid".to_string(), json!(app.as_str()));
        fields.insert("status".to_string(), json!(PENDING_STATUS));

        let response = self
            .post_json("sendwork", "sendwork", &json!({ "work": fields }))
            .await?;
        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkError::Submission {
                app: app.to_string(),
                reason: format!("HTTP {status}: {}", body.trim()),
            }
            .into());
        }
        success_or_remote("sendwork", response).await?;
        Ok(uid)
    }

    async fn wait_for_work(&self, uid: &Identifier) -> Result<ServerRecord> {
        loop {
            let record = self.get_by_uid(uid).await?;
            let Some(status) = record.field(WORK_ENTITY, "status") else {
                return Ok(record);
            };
            let status = WorkStatus::from(status);
            if status.is_terminal() {
                return Ok(record);
            }
            debug!(uid = %uid, status = %status, "work still running");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn download(&self, uid: &Identifier) -> Result<ByteChunks> {
        // No per-request timeout: payloads may legitimately take a long time.
        let url = self.url(&["downloaddata", uid.as_str()])?;
        let response = self.send("downloaddata", self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ResultError::NotFound {
                uid: uid.to_string(),
            }
            .into());
        }
        let response = success_or_remote("downloaddata", response).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| anyhow::Error::new(e.without_url()).context("download interrupted"))
            })
            .boxed())
    }

    async fn version(&self) -> Result<String> {
        let response = self.get("version", &["version"]).await?;
        let response = success_or_remote("version", response).await?;
        let body: Value = response.json().await.context("decoding version record")?;
        version_string(&body).ok_or_else(|| {
            RemoteError {
                operation: "version".to_string(),
                reason: "response carries no version field".to_string(),
            }
            .into()
        })
    }

    async fn call(&self, operation: &str, args: &[String]) -> Result<Value> {
        let segments = operation_path(operation, args);
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let response = self.get(operation, &segments).await?;
        let response = success_or_remote(operation, response).await?;
        let text = response
            .text()
            .await
            .with_context(|| format!("reading {operation} response"))?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn join(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("server URL {base} cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn new_uid() -> Result<Identifier> {
    Ok(Identifier::parse(&uuid::Uuid::new_v4().to_string())?)
}

fn sha256_hex(payload: &[u8]) -> String {
    format!("{:x}", Sha256::digest(payload))
}

/// `name=value` pairs of every `Set-Cookie` header, joined for `Cookie`.
fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect::<Vec<_>>()
        .join("; ")
}

async fn success_or_remote(operation: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError {
        operation: operation.to_string(),
        reason: format!("HTTP {status}: {}", body.trim()),
    }
    .into())
}

/// URL path for a named operation. Known client-side names map to their
/// server routes; anything else is used verbatim as the first segment.
fn operation_path(operation: &str, args: &[String]) -> Vec<String> {
    let route = match operation {
        "getByUID" => "get",
        "getApps" => "getapps",
        "getWorks" => "getworks",
        "getDatas" => "getdatas",
        "removeByUID" => "remove",
        "version" => "version",
        other => other,
    };
    std::iter::once(route.to_string())
        .chain(args.iter().cloned())
        .collect()
}

fn version_string(body: &Value) -> Option<String> {
    [
        "/xwhep/Version/0/$/version",
        "/xwhep/Version/version",
        "/Version/0/$/version",
        "/Version/version",
        "/version",
    ]
    .iter()
    .find_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
    .map(str::to_string)
}
