//! Command-line interface.

pub mod load;
pub mod output;
pub mod update;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::constants::ENV_FILE;

/// sem - resolve cloud secret references in .env files.
#[derive(Parser)]
#[command(
    name = "sem",
    about = "Resolve cloud secret references in .env files into shell-ready variables",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Fetch secrets referenced by the input file and write the cache file
    #[command(
        after_help = "Custom AWS endpoints can be set with --endpoint-url for local development with services like LocalStack."
    )]
    Update {
        /// Input file with sem:// references
        #[arg(short, long, env = "SEM_INPUT", default_value = ENV_FILE)]
        input: String,
        /// Custom endpoint URL for AWS Secrets Manager
        #[arg(long, env = "SEM_ENDPOINT_URL")]
        endpoint_url: Option<String>,
        /// Write values without surrounding quotes
        #[arg(short = 'q', long)]
        no_quotes: bool,
        /// Keep JSON secrets as a single value
        #[arg(long)]
        no_expand_json: bool,
    },

    /// Print variables from the cache file
    Load {
        /// Input file the cache was generated from
        #[arg(short, long, env = "SEM_INPUT", default_value = ENV_FILE)]
        input: String,
        /// Print `export KEY='value'` lines
        #[arg(short = 'e', long)]
        with_export: bool,
        /// Skip variables already set in the environment
        #[arg(long)]
        only_unset: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Update {
            input,
            endpoint_url,
            no_quotes,
            no_expand_json,
        } => update::execute(update::UpdateArgs {
            input,
            endpoint_url,
            no_quotes,
            no_expand_json,
        }),
        Load {
            input,
            with_export,
            only_unset,
        } => load::execute(&input, with_export, only_unset),
        Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "sem", &mut std::io::stdout());
            Ok(())
        }
    }
}
