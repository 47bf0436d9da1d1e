//! deckhand - detect, compose and dispatch for a deployment CLI
//!
//! The library holds everything the `deckhand` binary is made of, so the
//! pieces can be driven and tested without a process boundary.
//!
//! # Core Concepts
//!
//! - **Detection**: ordered glob detectors classify a project directory into
//!   an application type; the first match wins and no match is "unknown"
//! - **Plugin registries**: one [`FactoryRegistry`] per category (apps,
//!   foundations, infrastructures), merged from builtin sources
//! - **Dispatch**: a [`CommandTable`] maps command names to constructors that
//!   all share one [`Meta`]
//! - **Shutdown**: [`ShutdownFunnel`] turns interrupts into tokens on a
//!   bounded channel that long-running commands read
//!
//! # Example Usage
//!
//! ```ignore
//! use deckhand::{BasicUi, CommandTable, DeckhandConfig, Meta, ShutdownFunnel};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! async fn run(name: &str, args: &[String]) -> anyhow::Result<i32> {
//!     let meta = Meta::builtin(
//!         DeckhandConfig::from_env()?,
//!         Arc::new(BasicUi::stdio()),
//!         Path::new("deckhand"),
//!     );
//!     let table = CommandTable::new(meta);
//!     let mut shutdown = ShutdownFunnel::start()?;
//!
//!     let command = table.dispatch(name)?;
//!     Ok(command.run(args, &mut shutdown).await)
//! }
//! ```

pub mod builtin;
pub mod cli;
pub mod command;
pub mod config;
pub mod detection;
pub mod meta;
pub mod plugin;
pub mod shutdown;
pub mod ui;
pub mod util;

pub use cli::{CliArgs, Command, CommandError, CommandTable};
pub use config::{ConfigError, DeckhandConfig};
pub use detection::{Detector, DetectorError, DetectorRegistry, DirectoryScanner, ScanError};
pub use meta::{CoreConfig, Meta};
pub use plugin::{
    Factory, FactoryRegistry, PluginCategory, PluginError, PluginMap, PluginTuple, Tuples,
};
pub use shutdown::{ShutdownChannel, ShutdownFunnel, ShutdownToken, SHUTDOWN_BUFFER_DEPTH};
pub use ui::{BasicUi, MemoryUi, PrefixedUi, Ui};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
