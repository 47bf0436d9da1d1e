use deckhand::cli::{CliArgs, CommandError, CommandTable, EXIT_FAILURE};
use deckhand::util::{config_from_env, init_logging, parse_level};
use deckhand::{BasicUi, DeckhandConfig, Meta, ShutdownChannel, ShutdownFunnel, Ui, VERSION};

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, Level};

/// Exit code when the command name is not in the dispatch table
const EXIT_NOT_FOUND: i32 = 127;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("deckhand v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    std::process::exit(run(&args).await);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut logging = config_from_env();
    if let Some(level_str) = &args.log_level {
        logging.level = parse_level(level_str);
    } else if args.verbose {
        logging.level = Level::DEBUG;
    } else if args.quiet {
        logging.level = Level::ERROR;
    }
    init_logging(logging);
}

/// Shared state, command table and interrupt channel for one invocation
fn setup(ui: Arc<dyn Ui>) -> Result<(Arc<Meta>, CommandTable, ShutdownChannel)> {
    let config = DeckhandConfig::from_env().context("Invalid configuration")?;
    debug!("{}", config);

    let executable = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("deckhand"));
    let meta = Meta::builtin(config, ui, &executable);
    let table = CommandTable::new(Arc::clone(&meta));
    let shutdown = ShutdownFunnel::start().context("Failed to install interrupt handler")?;

    Ok((meta, table, shutdown))
}

async fn run(args: &CliArgs) -> i32 {
    let ui: Arc<dyn Ui> = Arc::new(BasicUi::stdio());
    let (meta, table, mut shutdown) = match setup(Arc::clone(&ui)) {
        Ok(parts) => parts,
        Err(e) => {
            ui.error(&format!("{:#}", e));
            return EXIT_FAILURE;
        }
    };

    let name = args.command_name();
    let command = match table.dispatch(name) {
        Ok(command) => command,
        Err(CommandError::NotFound(name)) => {
            meta.ui.error(&format!("No such command: {}", name));
            if let Ok(help) = table.dispatch("help") {
                help.run(&[], &mut shutdown).await;
            }
            return EXIT_NOT_FOUND;
        }
        Err(e) => {
            error!(command = name, error = %e, "Command construction failed");
            meta.ui.error(&e.to_string());
            return EXIT_FAILURE;
        }
    };

    command.run(&args.args, &mut shutdown).await
}
