//! Name-keyed command dispatch table
//!
//! Every subcommand is registered here, once, against the same shared
//! [`Meta`]. The CLI front end only ever sees names: it asks the table to
//! construct the command behind a name and runs what comes back.

use super::command::{Command, CommandError};
use crate::command::{
    app_action::AppActionCommand,
    help::{HelpCommand, HelpTopic},
    infra::InfraCommand,
    plugin_builtin::PluginBuiltinCommand,
    status::StatusCommand,
    version::VersionCommand,
};
use crate::meta::Meta;
use crate::plugin::AppAction;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub type CommandFactory = Arc<dyn Fn() -> Result<Box<dyn Command>, CommandError> + Send + Sync>;

pub(crate) fn factory<F, C>(build: F) -> CommandFactory
where
    F: Fn() -> C + Send + Sync + 'static,
    C: Command + 'static,
{
    Arc::new(move || Ok(Box::new(build()) as Box<dyn Command>))
}

pub struct CommandEntry {
    pub name: &'static str,
    pub synopsis: &'static str,
    /// Listed to users; internal commands are dispatchable but hidden
    pub visible: bool,
    factory: CommandFactory,
}

pub struct CommandTable {
    entries: BTreeMap<&'static str, CommandEntry>,
    visible_names: Vec<&'static str>,
}

impl CommandTable {
    fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            visible_names: Vec::new(),
        }
    }

    /// Builds the full table. Every factory captures the same `meta`.
    pub fn new(meta: Arc<Meta>) -> Self {
        let mut table = Self::empty();

        for action in [
            AppAction::Compile,
            AppAction::Build,
            AppAction::Deploy,
            AppAction::Dev,
        ] {
            let m = Arc::clone(&meta);
            table.register(
                action.as_str(),
                AppActionCommand::synopsis_for(action),
                true,
                factory(move || AppActionCommand::new(Arc::clone(&m), action)),
            );
        }

        let m = Arc::clone(&meta);
        table.register(
            "infra",
            InfraCommand::SYNOPSIS,
            true,
            factory(move || InfraCommand::new(Arc::clone(&m))),
        );

        let m = Arc::clone(&meta);
        table.register(
            "status",
            StatusCommand::SYNOPSIS,
            true,
            factory(move || StatusCommand::new(Arc::clone(&m))),
        );

        let m = Arc::clone(&meta);
        table.register(
            "version",
            VersionCommand::SYNOPSIS,
            true,
            factory(move || VersionCommand::new(Arc::clone(&m))),
        );

        // Internal or not shown to users directly

        let m = Arc::clone(&meta);
        table.register(
            "plugin-builtin",
            PluginBuiltinCommand::SYNOPSIS,
            false,
            factory(move || PluginBuiltinCommand::new(Arc::clone(&m))),
        );

        let listing: Vec<HelpTopic> = table
            .visible_names
            .iter()
            .filter_map(|name| table.entries.get(name))
            .map(|e| HelpTopic {
                name: e.name,
                synopsis: e.synopsis,
                factory: Arc::clone(&e.factory),
            })
            .collect();
        let m = Arc::clone(&meta);
        table.register(
            "help",
            HelpCommand::SYNOPSIS,
            false,
            factory(move || HelpCommand::new(Arc::clone(&m), listing.clone())),
        );

        debug!(
            commands = table.entries.len(),
            visible = table.visible_names.len(),
            "Command table built"
        );
        table
    }

    fn register(
        &mut self,
        name: &'static str,
        synopsis: &'static str,
        visible: bool,
        factory: CommandFactory,
    ) {
        if visible {
            self.visible_names.push(name);
        }
        self.entries.insert(
            name,
            CommandEntry {
                name,
                synopsis,
                visible,
                factory,
            },
        );
    }

    /// Constructs the command registered under `name`
    pub fn dispatch(&self, name: &str) -> Result<Box<dyn Command>, CommandError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))?;
        debug!(command = name, "Dispatching command");
        (entry.factory)()
    }

    /// User-facing command names in registration order
    pub fn visible_names(&self) -> &[&'static str] {
        &self.visible_names
    }

    /// Every dispatchable name, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    pub fn entry(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}
