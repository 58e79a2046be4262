//! Command handlers
//!
//! Each handler returns the text to print so the binary stays a thin
//! wrapper and handlers can be tested directly.

pub mod generate;
pub mod inspect;
pub mod ls;
pub mod verify;

use crate::output::OutputStyle;
use crate::{Commands, OutputFormat};

/// Run a subcommand and return its output
pub fn run(command: &Commands, format: OutputFormat, style: &OutputStyle) -> anyhow::Result<String> {
    match command {
        Commands::Generate(args) => generate::handle(args, format, style),
        Commands::Inspect(args) => inspect::handle(args, format, style),
        Commands::Verify(args) => verify::handle(args, format, style),
        Commands::Ls(args) => ls::handle(args, format, style),
    }
}
