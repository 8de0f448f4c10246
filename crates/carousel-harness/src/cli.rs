use clap::{Parser, Subcommand};

use crate::check::{CheckConfigArgs, run_check_config};
use crate::error::Result;
use crate::replay::{ReplayArgs, run_replay};

#[derive(Debug, Parser)]
#[command(
    name = "carousel-harness",
    about = "Deterministic replay and configuration checks for the carousel controller",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines script and print notifications and final state.
    Replay(ReplayArgs),

    /// Validate a TOML configuration file and print the effective values.
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => run_replay(args),
        Commands::CheckConfig(args) => run_check_config(args),
    }
}
