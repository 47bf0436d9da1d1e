//! Infrastructure provider plugins

use super::registry::PluginHandle;
use super::{PluginCategory, PluginError, PluginTuple};
use crate::ui::Ui;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct InfraContext {
    pub name: String,
    pub ui: Arc<dyn Ui>,
}

#[async_trait]
pub trait Infrastructure: Send + Sync {
    fn tuple(&self) -> &PluginTuple;

    /// Creates or updates the provider's resources
    async fn execute(&self, ctx: &InfraContext) -> Result<(), PluginError>;

    async fn status(&self, ctx: &InfraContext) -> Result<String, PluginError>;
}

impl PluginHandle for Box<dyn Infrastructure> {
    const CATEGORY: PluginCategory = PluginCategory::Infrastructure;
}
