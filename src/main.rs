//! droidprep CLI - Android project resource preparation tool
//!
//! Usage: droidprep <COMMAND>
//!
//! Commands:
//!   prepare  Synchronize the project descriptor into the Android project
//!   clean    Remove every managed artifact

use anyhow::{Context, Result};
use clap::Parser;

use droidprep::{clean, prepare, ConsoleSink};

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sink = ConsoleSink::new(cli.verbose);

    match cli.command {
        Commands::Prepare { project } => prepare(&project, &sink)
            .with_context(|| format!("failed to prepare {}", project.display()))?,
        Commands::Clean { project } => clean(&project, &sink)
            .with_context(|| format!("failed to clean {}", project.display()))?,
    }

    Ok(())
}
