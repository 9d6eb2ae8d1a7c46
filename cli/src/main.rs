//! xwork — command-line client for XtremWeb work servers

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use xwork_cli::cli::Cli;
use xwork_cli::domain::error::error_code;
use xwork_cli::output::json::format_error;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            match json.then(|| format_error(&message, error_code(&e))) {
                Some(Ok(body)) => println!("{body}"),
                _ => eprintln!("Error: {message}"),
            }
            ExitCode::FAILURE
        }
    }
}
