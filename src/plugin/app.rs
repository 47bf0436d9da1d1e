//! Application runtime plugins

use super::registry::PluginHandle;
use super::{PluginCategory, PluginError, PluginTuple};
use crate::ui::Ui;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Lifecycle step a command asks an app plugin to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Compile,
    Build,
    Deploy,
    Dev,
}

impl AppAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppAction::Compile => "compile",
            AppAction::Build => "build",
            AppAction::Deploy => "deploy",
            AppAction::Dev => "dev",
        }
    }
}

impl fmt::Display for AppAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything an app plugin is handed for one invocation
#[derive(Clone)]
pub struct AppContext {
    /// Project root the app lives in
    pub root: PathBuf,
    pub app_type: String,
    pub ui: Arc<dyn Ui>,
}

#[async_trait]
pub trait App: Send + Sync {
    fn tuple(&self) -> &PluginTuple;

    async fn compile(&self, ctx: &AppContext) -> Result<(), PluginError>;

    async fn build(&self, ctx: &AppContext) -> Result<(), PluginError>;

    async fn deploy(&self, ctx: &AppContext) -> Result<(), PluginError>;

    /// Brings up the development environment. Returns once it is running;
    /// the caller decides how long to keep it up.
    async fn dev(&self, ctx: &AppContext) -> Result<(), PluginError>;

    async fn run(&self, action: AppAction, ctx: &AppContext) -> Result<(), PluginError> {
        match action {
            AppAction::Compile => self.compile(ctx).await,
            AppAction::Build => self.build(ctx).await,
            AppAction::Deploy => self.deploy(ctx).await,
            AppAction::Dev => self.dev(ctx).await,
        }
    }
}

impl PluginHandle for Box<dyn App> {
    const CATEGORY: PluginCategory = PluginCategory::App;
}
