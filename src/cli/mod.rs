pub mod args;
pub mod command;
pub mod table;

pub use args::CliArgs;
pub use command::{parse_args, Command, CommandError, EXIT_FAILURE, EXIT_OK};
pub use table::{CommandEntry, CommandTable};
