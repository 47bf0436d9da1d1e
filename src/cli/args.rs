use clap::Parser;

/// Front-end arguments. Everything after the command name belongs to the
/// command and is parsed by it.
#[derive(Parser, Debug)]
#[command(
    name = "deckhand",
    about = "Compile, build, deploy and develop applications",
    author,
    disable_help_flag = true,
    disable_version_flag = true,
    long_about = "deckhand detects the kind of application in a directory and drives the \
                  plugins registered for it: app runtimes, foundation services and \
                  infrastructure providers.\n\n\
                  Examples:\n  \
                  deckhand compile\n  \
                  deckhand dev ./service\n  \
                  deckhand infra --infra aws"
)]
pub struct CliArgs {
    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(long, help = "Print the version")]
    pub version: bool,

    #[arg(short = 'h', long, help = "Show the available commands")]
    pub help: bool,

    #[arg(value_name = "COMMAND", help = "Command to run")]
    pub command: Option<String>,

    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Arguments for the command"
    )]
    pub args: Vec<String>,
}

impl CliArgs {
    /// Name of the command to dispatch. `--version` and `--help` select the
    /// matching commands; no command at all means `help`.
    pub fn command_name(&self) -> &str {
        if self.version {
            "version"
        } else if self.help {
            "help"
        } else {
            self.command.as_deref().unwrap_or("help")
        }
    }
}
