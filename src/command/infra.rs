//! `infra`

use crate::cli::command::{parse_args, Command, EXIT_FAILURE, EXIT_OK};
use crate::meta::Meta;
use crate::plugin::{FoundationContext, InfraContext, PluginError};
use crate::shutdown::ShutdownChannel;
use async_trait::async_trait;
use clap::{CommandFactory, Parser};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
struct InfraArgs {
    #[arg(
        long = "infra",
        value_name = "NAME",
        help = "Infrastructure to provision (defaults to DECKHAND_DEFAULT_INFRA)"
    )]
    infra: Option<String>,
}

/// Provisions an infrastructure, then layers every registered foundation
/// onto it.
pub struct InfraCommand {
    meta: Arc<Meta>,
}

impl InfraCommand {
    pub const SYNOPSIS: &'static str = "Builds the infrastructure for your application";

    pub fn new(meta: Arc<Meta>) -> Self {
        Self { meta }
    }

    async fn provision(&self, name: &str) -> Result<(), PluginError> {
        let infra = self.meta.core.infrastructures.build(name)?;
        info!(plugin = %infra.tuple(), "Provisioning infrastructure");
        infra
            .execute(&InfraContext {
                name: name.to_string(),
                ui: Arc::clone(&self.meta.ui),
            })
            .await?;

        let ctx = FoundationContext {
            infra: name.to_string(),
            ui: Arc::clone(&self.meta.ui),
        };
        for foundation_type in self.meta.core.foundations.types() {
            let foundation = self.meta.core.foundations.build(foundation_type)?;
            foundation.apply(&ctx).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Command for InfraCommand {
    fn synopsis(&self) -> &'static str {
        Self::SYNOPSIS
    }

    fn help(&self) -> String {
        InfraArgs::command()
            .name("infra")
            .about(Self::SYNOPSIS)
            .render_help()
            .to_string()
    }

    async fn run(&self, args: &[String], _shutdown: &mut ShutdownChannel) -> i32 {
        let ui = &self.meta.ui;
        let args: InfraArgs = match parse_args("infra", args, ui.as_ref()) {
            Ok(args) => args,
            Err(code) => return code,
        };

        let name = args
            .infra
            .unwrap_or_else(|| self.meta.config.default_infra.clone());
        match self.provision(&name).await {
            Ok(()) => {
                ui.info(&format!("Infrastructure '{}' is ready", name));
                EXIT_OK
            }
            Err(e) => {
                ui.error(&e.to_string());
                EXIT_FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_support::{args, builtin_meta, shutdown};
    use crate::ui::UiLevel;

    #[tokio::test]
    async fn test_default_infra() {
        let (meta, ui) = builtin_meta();
        let (_tx, mut channel) = shutdown();

        let code = InfraCommand::new(meta).run(&[], &mut channel).await;

        assert_eq!(code, EXIT_OK);
        assert_eq!(
            ui.messages(UiLevel::Info),
            vec![
                "==> aws: provisioning infrastructure",
                "==> consul: layering consul onto aws",
                "Infrastructure 'aws' is ready",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_infra() {
        let (meta, ui) = builtin_meta();
        let (_tx, mut channel) = shutdown();

        let code = InfraCommand::new(meta)
            .run(&args(&["--infra", "gcp"]), &mut channel)
            .await;

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(
            ui.messages(UiLevel::Error),
            vec!["No infrastructure plugin registered for type 'gcp'"]
        );
    }
}
