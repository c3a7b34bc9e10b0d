//! Tabular Q-learning: off-policy TD control for discrete MDPs
//!
//! This crate provides:
//! - A generic Q-table with lazy zero-default action values
//! - Epsilon-greedy action selection over the live table
//! - A training pipeline with composable observers and per-episode statistics
//! - Greedy evaluation of learned policies
//! - A cliff-walking gridworld environment and a small CLI

pub mod cli;
pub mod envs;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod q_table;
pub mod serialization;
pub mod stats;

pub use error::{Error, Result};
pub use pipeline::{
    GreedyRollout, TrainingConfig, TrainingOutcome, TrainingPipeline, greedy_rollout,
};
pub use policy::EpsilonGreedy;
pub use ports::{Environment, Observer, Transition};
pub use q_table::QTable;
pub use serialization::SavedRun;
pub use stats::EpisodeStats;
