//! `help` (internal)

use crate::cli::command::{parse_args, Command, EXIT_FAILURE, EXIT_OK};
use crate::cli::table::CommandFactory;
use crate::meta::Meta;
use crate::shutdown::ShutdownChannel;
use crate::NAME;
use async_trait::async_trait;
use clap::{CommandFactory as _, Parser};
use std::sync::Arc;

#[derive(Parser, Debug)]
struct HelpArgs {
    #[arg(value_name = "COMMAND", help = "Command to describe")]
    command: Option<String>,
}

/// A visible command as the help listing sees it
#[derive(Clone)]
pub struct HelpTopic {
    pub name: &'static str,
    pub synopsis: &'static str,
    /// Builds the command so its full usage can be rendered
    pub factory: CommandFactory,
}

/// Prints the command listing, or the full usage of one command
pub struct HelpCommand {
    meta: Arc<Meta>,
    /// Visible commands in registration order
    topics: Vec<HelpTopic>,
}

impl HelpCommand {
    pub const SYNOPSIS: &'static str = "Shows the available commands";

    pub fn new(meta: Arc<Meta>, topics: Vec<HelpTopic>) -> Self {
        Self { meta, topics }
    }

    /// Usage line plus every visible command, names padded to one column
    pub fn listing(&self) -> String {
        let width = self
            .topics
            .iter()
            .map(|topic| topic.name.len())
            .max()
            .unwrap_or(0);

        let mut text = format!(
            "Usage: {} [--version] [--help] <command> [<args>]\n\nAvailable commands are:\n",
            NAME
        );
        for topic in &self.topics {
            text.push_str(&format!(
                "    {:width$}    {}\n",
                topic.name,
                topic.synopsis,
                width = width
            ));
        }
        text
    }

    fn describe(&self, name: &str) -> Result<String, String> {
        let topic = self
            .topics
            .iter()
            .find(|topic| topic.name == name)
            .ok_or_else(|| format!("No such command: {}", name))?;
        let command = (topic.factory)().map_err(|e| e.to_string())?;
        Ok(command.help())
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn synopsis(&self) -> &'static str {
        Self::SYNOPSIS
    }

    fn help(&self) -> String {
        HelpArgs::command()
            .name("help")
            .about(Self::SYNOPSIS)
            .render_help()
            .to_string()
    }

    async fn run(&self, args: &[String], _shutdown: &mut ShutdownChannel) -> i32 {
        let ui = &self.meta.ui;
        let args: HelpArgs = match parse_args("help", args, ui.as_ref()) {
            Ok(args) => args,
            Err(code) => return code,
        };

        match args.command {
            None => {
                ui.output(self.listing().trim_end());
                EXIT_OK
            }
            Some(name) => match self.describe(&name) {
                Ok(usage) => {
                    ui.output(usage.trim_end());
                    EXIT_OK
                }
                Err(message) => {
                    ui.error(&message);
                    EXIT_FAILURE
                }
            },
        }
    }
}
