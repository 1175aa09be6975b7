use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// droidprep - Android project resource preparation and synchronization tool
#[derive(Parser, Debug)]
#[command(name = "droidprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synchronize the project descriptor into the Android project
    Prepare {
        /// Path to the project root (contains config.xml and app/)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },

    /// Remove every managed artifact from the Android project
    Clean {
        /// Path to the project root (contains config.xml and app/)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prepare_with_project_path() {
        let cli = Cli::parse_from(["droidprep", "prepare", "--project", "/tmp/app"]);
        match cli.command {
            Commands::Prepare { project } => {
                assert_eq!(project, PathBuf::from("/tmp/app"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::parse_from(["droidprep", "-vv", "clean"]);
        assert_eq!(cli.verbose, 2);
    }
}
