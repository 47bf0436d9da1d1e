//! `plugin-builtin` (internal)
//!
//! Lists the plugins compiled into this binary together with the command
//! line a host would use to launch each one out of process.

use crate::cli::command::{parse_args, Command, EXIT_FAILURE, EXIT_OK};
use crate::meta::Meta;
use crate::plugin::{PluginCategory, PluginError, PluginTuple};
use crate::shutdown::ShutdownChannel;
use async_trait::async_trait;
use clap::{CommandFactory, Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum InventoryFormat {
    Human,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
struct PluginBuiltinArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    format: InventoryFormat,

    #[arg(value_name = "CATEGORY", help = "Only list this category")]
    category: Option<String>,

    #[arg(value_name = "TYPE", requires = "category", help = "Only list this type")]
    type_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct InventoryEntry<'a> {
    #[serde(flatten)]
    tuple: &'a PluginTuple,
    path: Option<&'a PathBuf>,
    args: Option<&'a [String]>,
}

pub struct PluginBuiltinCommand {
    meta: Arc<Meta>,
}

impl PluginBuiltinCommand {
    pub const SYNOPSIS: &'static str = "Lists the builtin plugins and how to launch them";

    pub fn new(meta: Arc<Meta>) -> Self {
        Self { meta }
    }

    fn inventory(&self, args: &PluginBuiltinArgs) -> Result<Vec<InventoryEntry<'_>>, PluginError> {
        let category = args
            .category
            .as_deref()
            .map(str::parse::<PluginCategory>)
            .transpose()?;

        let entries: Vec<InventoryEntry<'_>> = self
            .meta
            .core
            .tuples()
            .into_iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .filter(|t| {
                args.type_name
                    .as_deref()
                    .map_or(true, |name| t.type_name == name)
            })
            .map(|tuple| {
                let binary = self.meta.plugin_map.lookup(tuple.category, &tuple.type_name);
                InventoryEntry {
                    tuple,
                    path: binary.map(|b| &b.path),
                    args: binary.map(|b| b.args.as_slice()),
                }
            })
            .collect();

        match (category, &args.type_name) {
            (Some(category), Some(type_name)) if entries.is_empty() => {
                Err(PluginError::NotRegistered {
                    category,
                    type_name: type_name.clone(),
                })
            }
            _ => Ok(entries),
        }
    }

    fn render(
        entries: &[InventoryEntry<'_>],
        format: InventoryFormat,
    ) -> Result<String, String> {
        match format {
            InventoryFormat::Json => serde_json::to_string_pretty(entries).map_err(|e| e.to_string()),
            InventoryFormat::Yaml => serde_yaml::to_string(entries).map_err(|e| e.to_string()),
            InventoryFormat::Human => Ok(entries
                .iter()
                .map(|entry| match (entry.path, entry.args) {
                    (Some(path), Some(args)) => {
                        format!("{}\t{} {}", entry.tuple, path.display(), args.join(" "))
                    }
                    _ => format!("{}\t(in process)", entry.tuple),
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

#[async_trait]
impl Command for PluginBuiltinCommand {
    fn synopsis(&self) -> &'static str {
        Self::SYNOPSIS
    }

    fn help(&self) -> String {
        PluginBuiltinArgs::command()
            .name("plugin-builtin")
            .about(Self::SYNOPSIS)
            .render_help()
            .to_string()
    }

    async fn run(&self, args: &[String], _shutdown: &mut ShutdownChannel) -> i32 {
        let ui = &self.meta.ui;
        let args: PluginBuiltinArgs = match parse_args("plugin-builtin", args, ui.as_ref()) {
            Ok(args) => args,
            Err(code) => return code,
        };

        let entries = match self.inventory(&args) {
            Ok(entries) => entries,
            Err(e) => {
                ui.error(&e.to_string());
                return EXIT_FAILURE;
            }
        };

        match Self::render(&entries, args.format) {
            Ok(text) => {
                if !text.is_empty() {
                    ui.output(text.trim_end());
                }
                EXIT_OK
            }
            Err(e) => {
                ui.error(&format!("Failed to render plugin inventory: {}", e));
                EXIT_FAILURE
            }
        }
    }
}
