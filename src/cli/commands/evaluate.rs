//! Evaluate command - greedy rollout of a saved run

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::commands::train::EnvKind,
    envs::CliffWalking,
    pipeline::greedy_rollout,
    serialization::SavedRun,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained run with the greedy policy")]
pub struct EvaluateArgs {
    /// Saved run produced by `qlearn train --output`
    pub input: PathBuf,

    /// Environment to evaluate on
    #[arg(value_enum, default_value_t = EnvKind::CliffWalking)]
    pub env: EnvKind,

    /// Step budget for the rollout
    #[arg(long, default_value_t = 100)]
    pub max_steps: usize,

    /// Print each step of the trajectory
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let saved: SavedRun<usize> = SavedRun::load_from_file(&args.input)?;
    let outcome = saved.into_outcome()?;

    let rollout = match args.env {
        EnvKind::CliffWalking => {
            greedy_rollout(&mut CliffWalking::new(), &outcome.q_table, args.max_steps)?
        }
    };

    if args.verbose {
        for (i, step) in rollout.steps.iter().enumerate() {
            println!(
                "step {:3}: state {:3} action {} reward {:.1}",
                i, step.state, step.action, step.reward
            );
        }
    }

    println!("Steps:        {}", rollout.steps.len());
    println!("Total reward: {:.1}", rollout.total_reward);
    println!(
        "Terminated:   {}",
        if rollout.reached_terminal { "yes" } else { "no" }
    );

    Ok(())
}
