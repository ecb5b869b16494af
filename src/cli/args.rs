//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::PathId;

/// Hierarchical multi-select: browse nested options, toggle selections, manage filter chips
#[derive(Parser, Debug)]
#[command(name = "mlselect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file applied over the global config
    #[arg(short, long, global = true, env = "MLSELECT_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show options with their identifiers
    Tree {
        /// Option file (.toml or .json)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Toggle options and show the resulting selection
    Select {
        /// Option file (.toml or .json)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Identifiers to toggle, in order (e.g. fruit.citrus)
        ids: Vec<PathId>,

        /// Remove a filter chip after toggling (top-level identifier)
        #[arg(short, long = "remove", value_name = "ID")]
        remove: Vec<PathId>,

        /// Drill into a displayed option before listing rows (repeat to go deeper)
        #[arg(short, long = "open", value_name = "ID")]
        open: Vec<PathId>,

        /// Print JSON regardless of the configured output format
        #[arg(long)]
        json: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_select_args_when_parsing_then_identifiers_are_typed() {
        let cli = Cli::try_parse_from([
            "mlselect", "-dd", "select", "opts.toml", "1.1", "2", "--remove", "2", "--open", "1",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Select {
                ids, remove, open, json, ..
            }) => {
                assert_eq!(ids.len(), 2);
                assert_eq!(ids[0].to_string(), "1.1");
                assert_eq!(remove.len(), 1);
                assert_eq!(open.len(), 1);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_malformed_identifier_when_parsing_then_rejected() {
        let result = Cli::try_parse_from(["mlselect", "select", "opts.toml", "1..2"]);
        assert!(result.is_err());
    }
}
