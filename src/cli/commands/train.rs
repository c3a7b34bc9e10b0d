//! Train command - run Q-learning against a bundled environment

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    envs::CliffWalking,
    pipeline::{ProgressObserver, TrainingConfig, TrainingOutcome, TrainingPipeline},
    serialization::SavedRun,
};

/// Bundled environment to train on
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EnvKind {
    /// 4x12 cliff-walking gridworld
    CliffWalking,
}

impl std::fmt::Display for EnvKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvKind::CliffWalking => write!(f, "cliff-walking"),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryStats {
    num_episodes: usize,
    states_visited: usize,
    mean_episode_length: f64,
    mean_episode_reward: f64,
    final_100_mean_reward: f64,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    environment: String,
    training: SummaryStats,
    config: TrainingConfig,
}

#[derive(Parser, Debug)]
#[command(about = "Train a tabular Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Environment to train on
    #[arg(value_enum, default_value_t = EnvKind::CliffWalking)]
    pub env: EnvKind,

    /// Number of training episodes
    #[arg(long, short = 'n', default_value_t = 500)]
    pub episodes: usize,

    /// TD learning rate α
    #[arg(long, short = 'a', default_value_t = 0.5)]
    pub learning_rate: f64,

    /// Discount factor γ
    #[arg(long, short = 'g', default_value_t = 1.0)]
    pub discount_factor: f64,

    /// Exploration rate ε
    #[arg(long, short = 'e', default_value_t = 0.1)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abort any episode exceeding this many steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Output file for the trained run (MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional CSV file for per-episode statistics
    #[arg(long)]
    pub stats_csv: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = TrainingConfig {
        num_episodes: args.episodes,
        discount_factor: args.discount_factor,
        learning_rate: args.learning_rate,
        epsilon: args.epsilon,
        seed: args.seed,
        max_steps: args.max_steps,
    };

    let mut pipeline = TrainingPipeline::new(config.clone());
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let outcome = match args.env {
        EnvKind::CliffWalking => pipeline.run(&mut CliffWalking::new())?,
    };

    let summary = summarize(&outcome);
    println!("Environment:      {}", args.env);
    println!("Episodes:         {}", summary.num_episodes);
    println!("States visited:   {}", summary.states_visited);
    println!("Mean length:      {:.2}", summary.mean_episode_length);
    println!("Mean reward:      {:.2}", summary.mean_episode_reward);
    println!("Last-100 reward:  {:.2}", summary.final_100_mean_reward);

    if let Some(path) = &args.stats_csv {
        outcome.stats.save_csv(path)?;
        println!("Statistics saved to {}", path.display());
    }

    if let Some(path) = &args.summary {
        let file = std::fs::File::create(path)?;
        to_writer_pretty(
            file,
            &TrainingSummaryFile {
                environment: args.env.to_string(),
                training: summary,
                config: config.clone(),
            },
        )?;
        println!("Summary saved to {}", path.display());
    }

    if let Some(path) = &args.output {
        SavedRun::new(config, &outcome).save_to_file(path)?;
        println!("Trained run saved to {}", path.display());
    }

    Ok(())
}

fn summarize(outcome: &TrainingOutcome<usize>) -> SummaryStats {
    SummaryStats {
        num_episodes: outcome.stats.num_episodes(),
        states_visited: outcome.q_table.len(),
        mean_episode_length: outcome.stats.mean_length(),
        mean_episode_reward: outcome.stats.mean_reward(),
        final_100_mean_reward: outcome.stats.mean_reward_over_last(100),
    }
}
