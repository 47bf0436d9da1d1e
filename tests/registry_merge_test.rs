//! Merging plugin sources into one registry per category

use async_trait::async_trait;
use deckhand::builtin;
use deckhand::plugin::{App, AppAction, AppContext, Factory, FactoryRegistry};
use deckhand::ui::{MemoryUi, UiLevel};
use deckhand::{PluginCategory, PluginError, PluginTuple, Tuples};
use std::path::PathBuf;
use std::sync::Arc;

/// App that reports which source built it
struct SourceApp {
    tuple: PluginTuple,
    source: &'static str,
}

impl SourceApp {
    fn say(&self, action: &str, ctx: &AppContext) -> Result<(), PluginError> {
        ctx.ui.info(&format!("{} from {}", action, self.source));
        Ok(())
    }
}

#[async_trait]
impl App for SourceApp {
    fn tuple(&self) -> &PluginTuple {
        &self.tuple
    }

    async fn compile(&self, ctx: &AppContext) -> Result<(), PluginError> {
        self.say("compile", ctx)
    }

    async fn build(&self, ctx: &AppContext) -> Result<(), PluginError> {
        self.say("build", ctx)
    }

    async fn deploy(&self, ctx: &AppContext) -> Result<(), PluginError> {
        self.say("deploy", ctx)
    }

    async fn dev(&self, ctx: &AppContext) -> Result<(), PluginError> {
        self.say("dev", ctx)
    }
}

fn source(types: &[&str], version: &str, name: &'static str) -> FactoryRegistry<Box<dyn App>> {
    let tuples = Tuples::new(
        types
            .iter()
            .map(|t| PluginTuple::new(PluginCategory::App, *t, version))
            .collect(),
    );
    let version = version.to_string();
    let factory: Factory<Box<dyn App>> = Arc::new(move || {
        Ok(Box::new(SourceApp {
            tuple: PluginTuple::new(PluginCategory::App, "any", version.clone()),
            source: name,
        }) as Box<dyn App>)
    });
    tuples.map(factory)
}

#[tokio::test]
async fn test_later_source_wins_and_is_reported() {
    let apps = source(&["go", "node"], "0.1.0", "apps");
    let apps2 = source(&["go", "ruby"], "0.2.0", "apps2");

    let merged = apps.merge(apps2);

    assert_eq!(merged.types(), vec!["go", "node", "ruby"]);
    assert_eq!(merged.tuple("go").unwrap().version, "0.2.0");
    assert_eq!(merged.tuple("node").unwrap().version, "0.1.0");

    let overrides = merged.overrides();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].type_name, "go");
    assert_eq!(overrides[0].previous.version, "0.1.0");
    assert_eq!(overrides[0].replacement.version, "0.2.0");

    let ui = Arc::new(MemoryUi::new());
    let ctx = AppContext {
        root: PathBuf::from("."),
        app_type: "go".to_string(),
        ui: ui.clone(),
    };
    let go = merged.build("go").unwrap();
    go.run(AppAction::Build, &ctx).await.unwrap();
    assert_eq!(ui.messages(UiLevel::Info), vec!["build from apps2"]);
}

#[test]
fn test_disjoint_merge_order_does_not_matter() {
    let left = source(&["go"], "0.1.0", "left")
        .merge(source(&["php"], "0.1.0", "right"));
    let right = source(&["php"], "0.1.0", "right")
        .merge(source(&["go"], "0.1.0", "left"));

    assert_eq!(left.types(), right.types());
    assert_eq!(left.tuples(), right.tuples());
    assert!(left.overrides().is_empty());
    assert!(right.overrides().is_empty());
}

#[test]
fn test_missing_type_is_not_registered_error() {
    let registry = source(&["go"], "0.1.0", "apps");
    match registry.build("elixir") {
        Err(PluginError::NotRegistered {
            category,
            type_name,
        }) => {
            assert_eq!(category, PluginCategory::App);
            assert_eq!(type_name, "elixir");
        }
        Err(other) => panic!("Expected NotRegistered, got {}", other),
        Ok(_) => panic!("Expected NotRegistered, got an app"),
    }
}

#[test]
fn test_builtin_sources_do_not_collide() {
    let apps = builtin::apps::registry();
    assert_eq!(apps.len(), builtin::apps::SOURCES.len());
    assert!(apps.overrides().is_empty());
    assert!(builtin::foundations::registry().contains("consul"));
    assert!(builtin::infrastructures::registry().contains("aws"));
}
