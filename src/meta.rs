//! Shared, read-only state handed to every command
//!
//! [`Meta`] is assembled once at startup and shared through an `Arc`; nothing
//! in it changes after construction, so commands read it without locking.

use crate::builtin;
use crate::config::DeckhandConfig;
use crate::detection::DetectorRegistry;
use crate::plugin::{App, FactoryRegistry, Foundation, Infrastructure, PluginMap, PluginTuple};
use crate::ui::{PrefixedUi, Ui};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Merged plugin registries, one per category
#[derive(Clone, Default)]
pub struct CoreConfig {
    pub apps: FactoryRegistry<Box<dyn App>>,
    pub foundations: FactoryRegistry<Box<dyn Foundation>>,
    /// Infrastructure name to factory
    pub infrastructures: FactoryRegistry<Box<dyn Infrastructure>>,
    pub detectors: DetectorRegistry,
}

impl CoreConfig {
    /// Registries assembled from the sources compiled into the binary
    pub fn builtin() -> Self {
        let core = Self {
            apps: builtin::apps::registry(),
            foundations: builtin::foundations::registry(),
            infrastructures: builtin::infrastructures::registry(),
            detectors: DetectorRegistry::with_defaults(),
        };

        let overrides = core.apps.overrides().len()
            + core.foundations.overrides().len()
            + core.infrastructures.overrides().len();
        if overrides > 0 {
            warn!(overrides, "Builtin plugin sources registered duplicate types");
        }

        debug!(
            apps = core.apps.len(),
            foundations = core.foundations.len(),
            infrastructures = core.infrastructures.len(),
            detectors = core.detectors.len(),
            "Core configuration assembled"
        );
        core
    }

    /// Every registered tuple, apps first, then foundations, then
    /// infrastructures
    pub fn tuples(&self) -> Vec<&PluginTuple> {
        let mut tuples = self.apps.tuples();
        tuples.extend(self.foundations.tuples());
        tuples.extend(self.infrastructures.tuples());
        tuples
    }
}

pub struct Meta {
    pub core: CoreConfig,
    pub ui: Arc<dyn Ui>,
    pub plugin_map: PluginMap,
    pub config: DeckhandConfig,
}

impl Meta {
    pub fn new(
        config: DeckhandConfig,
        core: CoreConfig,
        ui: Arc<dyn Ui>,
        plugin_map: PluginMap,
    ) -> Self {
        Self {
            core,
            ui,
            plugin_map,
            config,
        }
    }

    /// Builds the shared state from builtin sources. `executable` is the
    /// binary that serves builtin plugins out of process.
    pub fn builtin(config: DeckhandConfig, ui: Arc<dyn Ui>, executable: &Path) -> Arc<Self> {
        let core = CoreConfig::builtin();
        let plugin_map = PluginMap::builtin(executable, core.tuples());
        let ui: Arc<dyn Ui> = if config.machine_readable {
            Arc::new(PrefixedUi::new(ui))
        } else {
            ui
        };

        Arc::new(Self::new(config, core, ui, plugin_map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginCategory;
    use crate::ui::{MemoryUi, UiLevel};
    use std::path::PathBuf;

    #[test]
    fn test_builtin_core() {
        let core = CoreConfig::builtin();
        assert_eq!(
            core.apps.types(),
            vec!["custom", "docker-external", "go", "node", "php", "python", "ruby"]
        );
        assert_eq!(core.foundations.types(), vec!["consul"]);
        assert_eq!(core.infrastructures.types(), vec!["aws"]);
        assert_eq!(core.tuples().len(), 9);
    }

    #[test]
    fn test_plugin_map_covers_every_tuple() {
        let meta = Meta::builtin(
            DeckhandConfig::default(),
            Arc::new(MemoryUi::new()),
            Path::new("/opt/deckhand"),
        );
        assert_eq!(meta.plugin_map.len(), meta.core.tuples().len());
        let consul = meta
            .plugin_map
            .lookup(PluginCategory::Foundation, "consul")
            .unwrap();
        assert_eq!(consul.path, PathBuf::from("/opt/deckhand"));
    }

    #[test]
    fn test_machine_readable_wraps_ui() {
        let memory = Arc::new(MemoryUi::new());
        let config = DeckhandConfig {
            machine_readable: true,
            ..DeckhandConfig::default()
        };
        let meta = Meta::builtin(config, memory.clone(), Path::new("deckhand"));

        meta.ui.info("ready");
        assert_eq!(memory.messages(UiLevel::Info), vec!["o:ready"]);
    }
}
