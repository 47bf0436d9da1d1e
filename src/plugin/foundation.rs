//! Foundation service plugins (service discovery, secrets, ...)

use super::registry::PluginHandle;
use super::{PluginCategory, PluginError, PluginTuple};
use crate::ui::Ui;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct FoundationContext {
    /// Infrastructure the foundation is layered onto
    pub infra: String,
    pub ui: Arc<dyn Ui>,
}

#[async_trait]
pub trait Foundation: Send + Sync {
    fn tuple(&self) -> &PluginTuple;

    async fn apply(&self, ctx: &FoundationContext) -> Result<(), PluginError>;
}

impl PluginHandle for Box<dyn Foundation> {
    const CATEGORY: PluginCategory = PluginCategory::Foundation;
}
