//! Builtin infrastructure providers

use crate::plugin::{
    Factory, FactoryRegistry, InfraContext, Infrastructure, PluginCategory, PluginError,
    PluginTuple,
};
use async_trait::async_trait;
use std::sync::Arc;

use super::apps::BUILTIN_VERSION;

struct Aws {
    tuple: PluginTuple,
}

#[async_trait]
impl Infrastructure for Aws {
    fn tuple(&self) -> &PluginTuple {
        &self.tuple
    }

    async fn execute(&self, ctx: &InfraContext) -> Result<(), PluginError> {
        ctx.ui.info(&format!("==> {}: provisioning infrastructure", ctx.name));
        Ok(())
    }

    async fn status(&self, _ctx: &InfraContext) -> Result<String, PluginError> {
        Ok("not provisioned".to_string())
    }
}

fn aws_factory() -> Factory<Box<dyn Infrastructure>> {
    Arc::new(|| {
        Ok(Box::new(Aws {
            tuple: PluginTuple::new(PluginCategory::Infrastructure, "aws", BUILTIN_VERSION),
        }) as Box<dyn Infrastructure>)
    })
}

/// Infrastructure name to factory
pub fn registry() -> FactoryRegistry<Box<dyn Infrastructure>> {
    let mut registry = FactoryRegistry::new();
    registry.register(
        PluginTuple::new(PluginCategory::Infrastructure, "aws", BUILTIN_VERSION),
        aws_factory(),
    );
    registry
}
