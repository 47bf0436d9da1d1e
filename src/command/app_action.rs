//! `compile`, `build`, `deploy` and `dev`
//!
//! All four resolve the application type the same way (explicit `--type`,
//! otherwise detection on the project directory) and hand off to the app
//! plugin registered for that type. `dev` then stays up until interrupted.

use super::detect_app_type;
use crate::cli::command::{parse_args, Command, EXIT_FAILURE, EXIT_OK};
use crate::meta::Meta;
use crate::plugin::{AppAction, AppContext};
use crate::shutdown::ShutdownChannel;
use async_trait::async_trait;
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
struct AppArgs {
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        help = "Application type; skips detection"
    )]
    app_type: Option<String>,

    #[arg(
        value_name = "PATH",
        help = "Project directory (defaults to current directory)"
    )]
    path: Option<PathBuf>,
}

pub struct AppActionCommand {
    meta: Arc<Meta>,
    action: AppAction,
}

impl AppActionCommand {
    pub fn new(meta: Arc<Meta>, action: AppAction) -> Self {
        Self { meta, action }
    }

    pub fn synopsis_for(action: AppAction) -> &'static str {
        match action {
            AppAction::Compile => "Prepares your project for being run",
            AppAction::Build => "Build the deployable artifact for the app",
            AppAction::Deploy => "Deploy the application",
            AppAction::Dev => "Start and manage a development environment",
        }
    }

    fn resolve_type(&self, args: &AppArgs, root: &Path) -> Result<String, String> {
        if let Some(app_type) = &args.app_type {
            return Ok(app_type.clone());
        }

        match detect_app_type(&self.meta, root) {
            Ok(Some(app_type)) => {
                debug!(app_type = %app_type, root = %root.display(), "Detected application type");
                Ok(app_type)
            }
            Ok(None) => Err(format!(
                "Could not detect the application type in {}. \
                 Specify one with --type (available: {})",
                root.display(),
                self.meta.core.apps.types().join(", ")
            )),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl Command for AppActionCommand {
    fn synopsis(&self) -> &'static str {
        Self::synopsis_for(self.action)
    }

    fn help(&self) -> String {
        let mut cmd = AppArgs::command()
            .name(self.action.as_str())
            .about(self.synopsis());
        cmd.render_help().to_string()
    }

    async fn run(&self, args: &[String], shutdown: &mut ShutdownChannel) -> i32 {
        let ui = &self.meta.ui;
        let args: AppArgs = match parse_args(self.action.as_str(), args, ui.as_ref()) {
            Ok(args) => args,
            Err(code) => return code,
        };

        let root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
        let app_type = match self.resolve_type(&args, &root) {
            Ok(app_type) => app_type,
            Err(message) => {
                ui.error(&message);
                return EXIT_FAILURE;
            }
        };

        let app = match self.meta.core.apps.build(&app_type) {
            Ok(app) => app,
            Err(e) => {
                ui.error(&e.to_string());
                return EXIT_FAILURE;
            }
        };

        info!(action = %self.action, plugin = %app.tuple(), "Running app action");
        let ctx = AppContext {
            root,
            app_type,
            ui: Arc::clone(ui),
        };
        if let Err(e) = app.run(self.action, &ctx).await {
            ui.error(&e.to_string());
            return EXIT_FAILURE;
        }

        if self.action == AppAction::Dev {
            ui.info("Development environment is running. Press Ctrl+C to stop.");
            if shutdown.recv().await.is_some() {
                ui.info("Interrupt received, stopping development environment");
            }
        }

        EXIT_OK
    }
}
