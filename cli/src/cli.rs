//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;
use crate::infra::settings::Settings;

/// Deploy apps, upload data, and run work on an XtremWeb work server
#[derive(Parser)]
#[command(
    name = "xwork",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Chain whose work server to talk to (see chains.yaml)
    #[arg(
        long,
        global = true,
        env = "XWORK_CHAIN",
        default_value = "development"
    )]
    pub chain: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload the app binary and register the app
    Deploy(commands::deploy::DeployArgs),

    /// Upload a data file and print its address
    Upload(commands::upload::UploadArgs),

    /// Submit work to a deployed app
    Submit(commands::submit::SubmitArgs),

    /// Show, wait for, or download a work result
    Result(commands::result::ResultArgs),

    /// Show the work server version
    Version,

    /// Call a named server operation and print the raw answer
    Api(commands::api::ApiArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            chain,
            command,
        } = self;
        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            chain,
        };
        let app = AppContext::new(&flags, Settings::from_env()?)?;

        match command {
            Command::Deploy(args) => commands::deploy::run(&app, &args).await,
            Command::Upload(args) => commands::upload::run(&app, &args).await,
            Command::Submit(args) => commands::submit::run(&app, &args).await,
            Command::Result(args) => commands::result::run(&app, args).await,
            Command::Version => commands::version::run(&app).await,
            Command::Api(args) => commands::api::run(&app, args).await,
        }
    }
}
