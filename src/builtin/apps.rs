//! Builtin application runtime sources
//!
//! Each source publishes its own [`Tuples`] and constructor. The runtime work
//! behind every action belongs to the external provisioning tools, so these
//! implementations only announce what they were asked to do.

use crate::plugin::{
    App, AppAction, AppContext, Factory, FactoryRegistry, PluginCategory, PluginError,
    PluginTuple, Tuples,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub const BUILTIN_VERSION: &str = "0.1.0";

/// App sources in assembly order
pub const SOURCES: &[&str] = &["go", "custom", "docker-external", "node", "php", "ruby", "python"];

struct BuiltinApp {
    tuple: PluginTuple,
}

impl BuiltinApp {
    fn announce(&self, action: AppAction, ctx: &AppContext) {
        debug!(plugin = %self.tuple, action = %action, root = %ctx.root.display(), "Builtin app invoked");
        ctx.ui.info(&format!(
            "==> {}: {} ({})",
            ctx.app_type,
            action,
            ctx.root.display()
        ));
    }
}

#[async_trait]
impl App for BuiltinApp {
    fn tuple(&self) -> &PluginTuple {
        &self.tuple
    }

    async fn compile(&self, ctx: &AppContext) -> Result<(), PluginError> {
        self.announce(AppAction::Compile, ctx);
        Ok(())
    }

    async fn build(&self, ctx: &AppContext) -> Result<(), PluginError> {
        self.announce(AppAction::Build, ctx);
        Ok(())
    }

    async fn deploy(&self, ctx: &AppContext) -> Result<(), PluginError> {
        self.announce(AppAction::Deploy, ctx);
        Ok(())
    }

    async fn dev(&self, ctx: &AppContext) -> Result<(), PluginError> {
        self.announce(AppAction::Dev, ctx);
        Ok(())
    }
}

fn tuple(type_name: &str) -> PluginTuple {
    PluginTuple::new(PluginCategory::App, type_name, BUILTIN_VERSION)
}

/// Tuples published by one builtin source, or `None` for an unknown source
pub fn tuples(source: &str) -> Option<Tuples> {
    SOURCES
        .contains(&source)
        .then(|| Tuples::new(vec![tuple(source)]))
}

fn factory(source: &'static str) -> Factory<Box<dyn App>> {
    if source == "docker-external" {
        return Arc::new(|| {
            which::which("docker").map_err(|_| PluginError::MissingBinary {
                tuple: tuple("docker-external"),
                binary: "docker".to_string(),
            })?;
            Ok(Box::new(BuiltinApp {
                tuple: tuple("docker-external"),
            }) as Box<dyn App>)
        });
    }

    Arc::new(move || Ok(Box::new(BuiltinApp { tuple: tuple(source) }) as Box<dyn App>))
}

/// Registry for a single builtin source
pub fn source(name: &'static str) -> Option<FactoryRegistry<Box<dyn App>>> {
    tuples(name).map(|t| t.map(factory(name)))
}

/// All builtin app sources merged in assembly order
pub fn registry() -> FactoryRegistry<Box<dyn App>> {
    SOURCES
        .iter()
        .copied()
        .filter_map(source)
        .fold(FactoryRegistry::new(), FactoryRegistry::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MemoryUi, UiLevel};
    use std::path::PathBuf;

    #[test]
    fn test_registry_contains_every_source() {
        let registry = registry();
        assert_eq!(registry.len(), SOURCES.len());
        for name in SOURCES {
            assert!(registry.contains(name), "missing {}", name);
        }
        assert!(registry.overrides().is_empty());
    }

    #[test]
    fn test_unknown_source() {
        assert!(tuples("cobol").is_none());
        assert!(source("cobol").is_none());
    }

    #[tokio::test]
    async fn test_builtin_app_reports_action() {
        let ui = Arc::new(MemoryUi::new());
        let ctx = AppContext {
            root: PathBuf::from("/srv/app"),
            app_type: "ruby".to_string(),
            ui: ui.clone(),
        };

        let app = registry().build("ruby").unwrap();
        app.run(AppAction::Build, &ctx).await.unwrap();

        assert_eq!(app.tuple().type_name, "ruby");
        assert_eq!(
            ui.messages(UiLevel::Info),
            vec!["==> ruby: build (/srv/app)".to_string()]
        );
    }
}
