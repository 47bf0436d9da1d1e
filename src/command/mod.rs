//! Subcommand implementations
//!
//! Each command holds the shared [`Meta`] and parses its own arguments.
//! Failures are reported through the output sink and turned into an exit
//! code; nothing here terminates the process.

pub mod app_action;
pub mod help;
pub mod infra;
pub mod plugin_builtin;
pub mod status;
pub mod version;

use crate::detection::{DirectoryScanner, ScanError};
use crate::meta::Meta;
use std::path::Path;

/// Classifies `root` with the registered detectors; `None` means unknown
pub(crate) fn detect_app_type(meta: &Meta, root: &Path) -> Result<Option<String>, ScanError> {
    let listing = DirectoryScanner::new(root)?
        .with_max_depth(meta.config.scan_depth)
        .scan()?;
    Ok(meta.core.detectors.classify(&listing).map(str::to_string))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::DeckhandConfig;
    use crate::meta::Meta;
    use crate::shutdown::{ShutdownChannel, ShutdownToken, SHUTDOWN_BUFFER_DEPTH};
    use crate::ui::MemoryUi;
    use std::path::Path;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    pub fn builtin_meta() -> (Arc<Meta>, Arc<MemoryUi>) {
        let ui = Arc::new(MemoryUi::new());
        let meta = Meta::builtin(config(), ui.clone(), Path::new("/usr/local/bin/deckhand"));
        (meta, ui)
    }

    /// Fixed configuration, independent of the test process environment
    pub fn config() -> DeckhandConfig {
        DeckhandConfig {
            log_level: "info".to_string(),
            default_infra: "aws".to_string(),
            machine_readable: false,
            scan_depth: 1,
        }
    }

    /// Channel plus the sender that stands in for the interrupt listener
    pub fn shutdown() -> (mpsc::Sender<ShutdownToken>, ShutdownChannel) {
        let (tx, rx) = mpsc::channel(SHUTDOWN_BUFFER_DEPTH);
        (tx, ShutdownChannel::new(rx))
    }

    pub fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }
}
