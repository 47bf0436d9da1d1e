//! Builtin foundation sources

use crate::plugin::{
    Factory, FactoryRegistry, Foundation, FoundationContext, PluginCategory, PluginError,
    PluginTuple, Tuples,
};
use async_trait::async_trait;
use std::sync::Arc;

use super::apps::BUILTIN_VERSION;

struct Consul {
    tuple: PluginTuple,
}

#[async_trait]
impl Foundation for Consul {
    fn tuple(&self) -> &PluginTuple {
        &self.tuple
    }

    async fn apply(&self, ctx: &FoundationContext) -> Result<(), PluginError> {
        ctx.ui.info(&format!(
            "==> {}: layering consul onto {}",
            self.tuple.type_name, ctx.infra
        ));
        Ok(())
    }
}

pub fn consul_tuples() -> Tuples {
    Tuples::new(vec![PluginTuple::new(
        PluginCategory::Foundation,
        "consul",
        BUILTIN_VERSION,
    )])
}

fn consul_factory() -> Factory<Box<dyn Foundation>> {
    Arc::new(|| {
        Ok(Box::new(Consul {
            tuple: PluginTuple::new(PluginCategory::Foundation, "consul", BUILTIN_VERSION),
        }) as Box<dyn Foundation>)
    })
}

pub fn registry() -> FactoryRegistry<Box<dyn Foundation>> {
    consul_tuples().map(consul_factory())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MemoryUi;

    #[tokio::test]
    async fn test_consul_applies_to_infra() {
        let ui = Arc::new(MemoryUi::new());
        let consul = registry().build("consul").unwrap();
        consul
            .apply(&FoundationContext {
                infra: "aws".to_string(),
                ui: ui.clone(),
            })
            .await
            .unwrap();
        assert!(ui.text().contains("consul onto aws"));
    }
}
