//! Application service — top-level operations exposed to the command layer.
//!
//! Each operation resolves its chain, opens its own session, runs one
//! use-case, and drops the session on return. Nothing is shared between
//! operations except the read-only collaborators in [`Collaborators`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::application::ports::{
    ChainRegistry, ContractBindingStore, CredentialStore, ProgressReporter, ProjectFiles,
    ServerConnector, ServerSession as _,
};
use crate::application::services::deploy::{DeployRequest, deploy};
use crate::application::services::work::{self, WaitPolicy};
use crate::application::services::{artifact, invoke, result, session};
use crate::domain::{
    Address, AddressCodec as _, AppConfig, ChainEndpoint, Identifier, ProjectConfig,
    RemoteError, SaveTarget, WorkError, WorkStatus, contract_address,
};

/// Read-only collaborators shared by every top-level operation.
pub struct Collaborators<'a, K, R, C, F> {
    /// Credential source.
    pub credentials: &'a K,
    /// Chain table.
    pub chains: &'a R,
    /// Session factory.
    pub connector: &'a C,
    /// Project files.
    pub files: &'a F,
}

/// Result of a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub app_uid: Identifier,
    pub chain: String,
    pub contract_address: String,
}

/// Result of a successful data upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub data_uid: Identifier,
    pub address: Address,
}

/// Outcome of `fetch_result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultOutcome {
    /// The work has not finished yet.
    InProgress {
        work_uid: Identifier,
        status: WorkStatus,
    },
    /// The work finished without a result (ERROR, ABORTED, ...).
    Failed {
        work_uid: Identifier,
        status: WorkStatus,
    },
    /// The work completed; `saved_to` is set when the result was downloaded.
    Completed {
        work_uid: Identifier,
        result_address: Address,
        saved_to: Option<PathBuf>,
    },
}

impl<K, R, C, F> Collaborators<'_, K, R, C, F>
where
    K: CredentialStore,
    R: ChainRegistry,
    C: ServerConnector,
    F: ProjectFiles,
{
    async fn open(&self, chain: &str) -> Result<(ChainEndpoint, C::Session)> {
        session::open(self.chains, self.credentials, self.connector, chain).await
    }

    /// Deploy the project's app bound to the dapp contract on `chain`.
    ///
    /// The contract binding is checked before any server call.
    ///
    /// # Errors
    ///
    /// Returns `MissingBinding` when the contract is not deployed on the
    /// chain's network, plus any deploy failure.
    pub async fn deploy_application(
        &self,
        chain: &str,
        project: &ProjectConfig,
        bindings: &impl ContractBindingStore,
        app_name: Option<&str>,
        reporter: &impl ProgressReporter,
    ) -> Result<DeployOutcome> {
        let app_name = project.app_name(app_name);
        debug!(app_name, "deploying");
        let endpoint = self.chains.resolve(chain)?;
        let networks = bindings
            .load_networks()
            .context("loading contract description")?;
        let contract = contract_address(&networks, &endpoint)?;
        debug!(contract_address = %contract, "contract binding found");

        reporter.step("sending app to work server...");
        let (endpoint, session) = self.open(chain).await?;
        let codec = artifact::codec_for(&endpoint);
        let default_app = AppConfig::default();
        let request = DeployRequest {
            chain,
            app_name,
            contract_address: &contract,
            app: project.app.as_ref().unwrap_or(&default_app),
            data: &project.data,
        };
        let app_uid = deploy(&session, &codec, self.files, &request, reporter)
            .await
            .context("deploy failed")?;
        info!(app_uid = %app_uid, chain, "app deployed");
        Ok(DeployOutcome {
            app_uid,
            chain: chain.to_string(),
            contract_address: contract,
        })
    }

    /// Upload a data file and return its shareable address.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, validation, or upload fails.
    pub async fn upload_data(
        &self,
        chain: &str,
        project: &ProjectConfig,
        path: &Path,
        reporter: &impl ProgressReporter,
    ) -> Result<UploadOutcome> {
        debug!(path = %path.display(), "uploading data");
        let (endpoint, session) = self.open(chain).await?;
        reporter.step("uploading data to work server...");
        let data_uid = artifact::register_file(&session, self.files, path, &project.data)
            .await
            .context("upload failed")?;
        let address = artifact::codec_for(&endpoint).encode(&data_uid);
        info!(data_uid = %data_uid, "data uploaded");
        Ok(UploadOutcome { data_uid, address })
    }

    /// Submit the project's work parameters against app `app_uid`.
    ///
    /// # Errors
    ///
    /// Returns `Submission` for an empty app uid before any network call.
    pub async fn submit_work(
        &self,
        chain: &str,
        project: &ProjectConfig,
        app_uid: &str,
        reporter: &impl ProgressReporter,
    ) -> Result<Identifier> {
        if app_uid.trim().is_empty() {
            return Err(WorkError::Submission {
                app: String::new(),
                reason: "appUID undefined".to_string(),
            }
            .into());
        }
        let (_, session) = self.open(chain).await?;
        reporter.step(&format!("submitting work to app {app_uid}..."));
        let work_uid = work::submit(&session, app_uid, &project.work).await?;
        info!(work_uid = %work_uid, app_uid, "work submitted");
        Ok(work_uid)
    }

    /// Fetch the result of `work_uid`, optionally blocking until it ends
    /// and optionally saving the payload.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown work, a `RemoteError` for a
    /// completed work without a result address, and any resolve/download
    /// failure. A failed or unfinished work is not an error. Without a save
    /// target the result record is never read.
    pub async fn fetch_result(
        &self,
        chain: &str,
        work_uid: &str,
        save: &SaveTarget,
        watch: bool,
        policy: WaitPolicy,
        reporter: &impl ProgressReporter,
    ) -> Result<ResultOutcome> {
        let uid = Identifier::parse(work_uid.trim())?;
        let (endpoint, session) = self.open(chain).await?;
        reporter.step(&format!("fetching result of work {uid}..."));

        let work = if watch {
            work::await_completion(&session, &uid, policy).await?
        } else {
            work::fetch_status(&session, &uid).await?
        };
        debug!(status = %work.status, "work status");

        if work.status.is_failure() {
            return Ok(ResultOutcome::Failed {
                work_uid: uid,
                status: work.status,
            });
        }
        let result_address = match work.result_address() {
            Ok(address) => address.clone(),
            Err(_) if !work.status.is_terminal() => {
                if !matches!(save, SaveTarget::Skip) {
                    reporter.warn(&format!("work {uid} has no result yet, nothing saved"));
                }
                return Ok(ResultOutcome::InProgress {
                    work_uid: uid,
                    status: work.status,
                });
            }
            Err(_) => {
                return Err(RemoteError {
                    operation: "getByUID".to_string(),
                    reason: format!("work {uid} is {} but has no result address", work.status),
                })
                .with_context(|| format!("fetching result of work {uid}"));
            }
        };
        if matches!(save, SaveTarget::Skip) {
            return Ok(ResultOutcome::Completed {
                work_uid: uid,
                result_address,
                saved_to: None,
            });
        }

        let codec = artifact::codec_for(&endpoint);
        let descriptor = result::resolve(&session, &codec, &result_address).await?;
        let saved_to = match save.file_name(&uid, &descriptor.content_type) {
            Some(file_name) => {
                reporter.step(&format!("downloading result to {file_name}..."));
                Some(result::save(&session, self.files, &descriptor, &file_name).await?)
            }
            None => None,
        };
        Ok(ResultOutcome::Completed {
            work_uid: uid,
            result_address,
            saved_to,
        })
    }

    /// Server version string.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be opened or the query fails.
    pub async fn fetch_version(&self, chain: &str) -> Result<String> {
        let (_, session) = self.open(chain).await?;
        session.version().await.context("fetching server version")
    }

    /// Generic passthrough: `args[0]` is the operation, the rest its
    /// arguments. See [`invoke`] for the caveats.
    ///
    /// # Errors
    ///
    /// Returns an error if `args` is empty or the server call fails.
    pub async fn invoke_generic(&self, chain: &str, args: &[String]) -> Result<Value> {
        let Some((operation, rest)) = args.split_first() else {
            anyhow::bail!("missing operation name");
        };
        let (_, session) = self.open(chain).await?;
        invoke::invoke(&session, operation, rest).await
    }
}
