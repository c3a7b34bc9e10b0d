//! qlearn CLI - tabular Q-learning toolkit
//!
//! This CLI provides a unified interface for:
//! - Training Q-learning agents on the bundled environments
//! - Evaluating learned policies with greedy rollouts

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qlearn")]
#[command(version, about = "Tabular Q-learning toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent
    Train(qlearn::cli::commands::train::TrainArgs),

    /// Evaluate a trained run against an environment
    Evaluate(qlearn::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qlearn::cli::commands::train::execute(args),
        Commands::Evaluate(args) => qlearn::cli::commands::evaluate::execute(args),
    }
}
