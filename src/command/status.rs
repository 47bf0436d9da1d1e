//! `status`

use super::detect_app_type;
use crate::cli::command::{parse_args, Command, EXIT_FAILURE, EXIT_OK};
use crate::meta::Meta;
use crate::plugin::{InfraContext, PluginCategory};
use crate::shutdown::ShutdownChannel;
use async_trait::async_trait;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
struct StatusArgs {
    #[arg(
        value_name = "PATH",
        help = "Project directory (defaults to current directory)"
    )]
    path: Option<PathBuf>,
}

pub struct StatusCommand {
    meta: Arc<Meta>,
}

impl StatusCommand {
    pub const SYNOPSIS: &'static str = "Status of the stack";

    pub fn new(meta: Arc<Meta>) -> Self {
        Self { meta }
    }

    fn registered(&self, category: PluginCategory) -> Vec<&str> {
        let core = &self.meta.core;
        match category {
            PluginCategory::App => core.apps.types(),
            PluginCategory::Foundation => core.foundations.types(),
            PluginCategory::Infrastructure => core.infrastructures.types(),
        }
    }

    async fn infra_status(&self) -> String {
        let name = &self.meta.config.default_infra;
        let ctx = InfraContext {
            name: name.clone(),
            ui: Arc::clone(&self.meta.ui),
        };
        let status = match self.meta.core.infrastructures.build(name) {
            Ok(infra) => infra.status(&ctx).await,
            Err(e) => Err(e),
        };
        match status {
            Ok(status) => format!("Infrastructure ({}): {}", name, status),
            Err(e) => format!("Infrastructure ({}): {}", name, e),
        }
    }
}

#[async_trait]
impl Command for StatusCommand {
    fn synopsis(&self) -> &'static str {
        Self::SYNOPSIS
    }

    fn help(&self) -> String {
        StatusArgs::command()
            .name("status")
            .about(Self::SYNOPSIS)
            .render_help()
            .to_string()
    }

    async fn run(&self, args: &[String], _shutdown: &mut ShutdownChannel) -> i32 {
        let ui = &self.meta.ui;
        let args: StatusArgs = match parse_args("status", args, ui.as_ref()) {
            Ok(args) => args,
            Err(code) => return code,
        };

        let root = args.path.unwrap_or_else(|| PathBuf::from("."));
        let app_type = match detect_app_type(&self.meta, &root) {
            Ok(app_type) => app_type,
            Err(e) => {
                ui.error(&e.to_string());
                return EXIT_FAILURE;
            }
        };

        ui.output(&format!(
            "App type: {}",
            app_type.as_deref().unwrap_or("unknown")
        ));
        for &category in PluginCategory::all() {
            let types = self.registered(category);
            let listed = if types.is_empty() {
                "(none)".to_string()
            } else {
                types.join(", ")
            };
            ui.output(&format!("Registered {} plugins: {}", category, listed));
        }
        ui.output(&self.infra_status().await);

        EXIT_OK
    }
}
