//! Per-episode training statistics

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One exported row of episode statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub length: f64,
    pub reward: f64,
}

/// Parallel per-episode statistics for a training run
///
/// Both vectors are allocated up front with one zero entry per episode.
/// `episode_lengths[i]` holds the index of episode i's terminal step;
/// `episode_rewards[i]` holds episode i's cumulative reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub episode_lengths: Vec<f64>,
    pub episode_rewards: Vec<f64>,
}

impl EpisodeStats {
    /// Allocate statistics for `num_episodes` episodes
    pub fn new(num_episodes: usize) -> Self {
        Self {
            episode_lengths: vec![0.0; num_episodes],
            episode_rewards: vec![0.0; num_episodes],
        }
    }

    /// Number of episodes this run was configured for
    pub fn num_episodes(&self) -> usize {
        self.episode_lengths.len()
    }

    /// Record one environment step for an episode
    ///
    /// Accumulates the reward and overwrites the episode length with the
    /// current step index, so its final value is the terminal step's index.
    pub fn record_step(&mut self, episode: usize, step: usize, reward: f64) {
        self.episode_rewards[episode] += reward;
        self.episode_lengths[episode] = step as f64;
    }

    /// Mean episode reward over the whole run
    pub fn mean_reward(&self) -> f64 {
        mean(&self.episode_rewards)
    }

    /// Mean episode length over the whole run
    pub fn mean_length(&self) -> f64 {
        mean(&self.episode_lengths)
    }

    /// Mean reward over the final `window` episodes
    pub fn mean_reward_over_last(&self, window: usize) -> f64 {
        let start = self.episode_rewards.len().saturating_sub(window);
        mean(&self.episode_rewards[start..])
    }

    /// Mean length over the final `window` episodes
    pub fn mean_length_over_last(&self, window: usize) -> f64 {
        let start = self.episode_lengths.len().saturating_sub(window);
        mean(&self.episode_lengths[start..])
    }

    /// Write one CSV row per episode to the given writer
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for episode in 0..self.num_episodes() {
            csv_writer.serialize(EpisodeRecord {
                episode,
                length: self.episode_lengths[episode],
                reward: self.episode_rewards[episode],
            })?;
        }
        csv_writer.flush().map_err(|source| Error::Io {
            operation: "flush episode statistics CSV".to_string(),
            source,
        })?;
        Ok(())
    }

    /// Save episode statistics as a CSV file
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create file: {}", path.as_ref().display()),
            source,
        })?;
        self.write_csv(file)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
