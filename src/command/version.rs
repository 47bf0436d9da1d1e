//! `version`

use crate::cli::command::{parse_args, Command, EXIT_OK};
use crate::meta::Meta;
use crate::shutdown::ShutdownChannel;
use crate::{NAME, VERSION};
use async_trait::async_trait;
use clap::{CommandFactory, Parser};
use std::sync::Arc;

#[derive(Parser, Debug)]
struct VersionArgs {}

/// Prints the binary version. Never touches the plugin registries, so it
/// works even when none are populated.
pub struct VersionCommand {
    meta: Arc<Meta>,
}

impl VersionCommand {
    pub const SYNOPSIS: &'static str = "Prints the version";

    pub fn new(meta: Arc<Meta>) -> Self {
        Self { meta }
    }
}

#[async_trait]
impl Command for VersionCommand {
    fn synopsis(&self) -> &'static str {
        Self::SYNOPSIS
    }

    fn help(&self) -> String {
        VersionArgs::command()
            .name("version")
            .about(Self::SYNOPSIS)
            .render_help()
            .to_string()
    }

    async fn run(&self, args: &[String], _shutdown: &mut ShutdownChannel) -> i32 {
        if let Err(code) = parse_args::<VersionArgs>("version", args, self.meta.ui.as_ref()) {
            return code;
        }
        self.meta.ui.output(&format!("{} v{}", NAME, VERSION));
        EXIT_OK
    }
}
