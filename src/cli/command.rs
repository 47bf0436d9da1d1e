//! Runnable command abstraction

use crate::shutdown::ShutdownChannel;
use crate::ui::Ui;
use async_trait::async_trait;
use clap::error::ErrorKind;
use clap::Parser;
use thiserror::Error;

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;

/// Exit code for any reported failure
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No such command: {0}")]
    NotFound(String),

    #[error("Failed to construct command '{name}': {source}")]
    Construction {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[async_trait]
pub trait Command: Send + Sync {
    /// One-line description shown in the command listing
    fn synopsis(&self) -> &'static str;

    /// Full usage text
    fn help(&self) -> String;

    /// Runs to completion and returns the process exit code. Long-running
    /// commands read `shutdown` to learn about interrupts.
    async fn run(&self, args: &[String], shutdown: &mut ShutdownChannel) -> i32;
}

/// Parses a command's own arguments.
///
/// On `--help` the usage goes to the output stream and the caller should
/// exit successfully; any other parse problem is reported as an error. The
/// `Err` value is the exit code to return.
pub fn parse_args<P: Parser>(name: &str, args: &[String], ui: &dyn Ui) -> Result<P, i32> {
    let argv = std::iter::once(name.to_string()).chain(args.iter().cloned());
    P::try_parse_from(argv).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            ui.output(e.to_string().trim_end());
            EXIT_OK
        }
        _ => {
            ui.error(e.to_string().trim_end());
            EXIT_FAILURE
        }
    })
}
