//! Application context — unified state passed to every command handler.
//!
//! `AppContext` owns the output context, the loaded settings and the
//! concrete infrastructure adapters. Command handlers borrow it and hand
//! the adapters to application services as port traits.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::services::operations::Collaborators;
use crate::domain::ProjectConfig;
use crate::infra::config::{YamlChainRegistry, load_project};
use crate::infra::contracts::TruffleContractStore;
use crate::infra::credentials::AccountFileStore;
use crate::infra::fs::LocalProjectFiles;
use crate::infra::http::HttpConnector;
use crate::infra::settings::Settings;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Chain every command targets.
    pub chain: String,
}

/// Concrete collaborators used by every top-level operation.
pub type Adapters<'a> =
    Collaborators<'a, AccountFileStore, YamlChainRegistry, HttpConnector, LocalProjectFiles>;

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Chain name selected on the command line.
    pub chain: String,
    /// Settings from `XWORK_*` environment variables.
    pub settings: Settings,
    project_dir: PathBuf,
    credentials: AccountFileStore,
    chains: YamlChainRegistry,
    connector: HttpConnector,
    files: LocalProjectFiles,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags and settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the project directory cannot be resolved or the
    /// HTTP client cannot be built.
    pub fn new(flags: &AppFlags, settings: Settings) -> Result<Self> {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let project_dir = settings.project_dir()?;
        let connector = HttpConnector::new(settings.http_timeout(), settings.poll_interval())?;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            chain: flags.chain.clone(),
            credentials: AccountFileStore::new(settings.jwtoken.clone(), &project_dir),
            chains: YamlChainRegistry::new(&project_dir),
            files: LocalProjectFiles::new(&project_dir),
            connector,
            project_dir,
            settings,
        })
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter; silent in JSON mode so stdout stays parseable.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        match self.mode {
            OutputMode::Human => TerminalReporter::new(&self.output),
            OutputMode::Json => TerminalReporter::silent(&self.output),
        }
    }

    /// Collaborators for the top-level operations.
    #[must_use]
    pub fn adapters(&self) -> Adapters<'_> {
        Collaborators {
            credentials: &self.credentials,
            chains: &self.chains,
            connector: &self.connector,
            files: &self.files,
        }
    }

    /// Project directory all relative paths resolve against.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Load `xwork.yaml` from the project directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid.
    pub fn project(&self) -> Result<ProjectConfig> {
        load_project(&self.project_dir)
    }

    /// Contract artifact store for dapp `name`.
    #[must_use]
    pub fn contracts(&self, name: &str) -> TruffleContractStore {
        TruffleContractStore::new(&self.project_dir, name)
    }
}
