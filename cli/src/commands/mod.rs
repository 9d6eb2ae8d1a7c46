//! Command implementations

pub mod api;
pub mod deploy;
pub mod result;
pub mod submit;
pub mod upload;
pub mod version;

use anyhow::Result;

use crate::output::TerminalReporter;

/// Close the reporter's spinner according to `result` before anything is
/// rendered on stdout.
fn settle<T>(reporter: TerminalReporter<'_>, result: Result<T>, done: &str) -> Result<T> {
    match &result {
        Ok(_) => reporter.finish(done),
        Err(_) => reporter.fail("failed"),
    }
    result
}
