//! Bundled observers for training pipelines
//!
//! Observers allow composable data collection during training without
//! coupling the learning loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    ports::Observer,
};

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    last_reward: f64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            last_reward: 0.0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, num_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(num_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, _length: usize, reward: f64) -> Result<()> {
        self.last_reward = reward;
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("R: {reward:.1}"));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("R: {:.1}", self.last_reward));
        }
        Ok(())
    }
}

/// Metrics observer - tracks running training metrics
pub struct MetricsObserver {
    episodes: usize,
    total_steps: usize,
    total_reward: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            episodes: 0,
            total_steps: 0,
            total_reward: 0.0,
        }
    }

    /// Number of completed episodes
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Mean episode reward so far
    pub fn mean_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }

    /// Mean number of steps per episode so far
    pub fn mean_steps(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _action: usize,
        _probs: &[f64],
        _reward: f64,
    ) -> Result<()> {
        self.total_steps += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _length: usize, reward: f64) -> Result<()> {
        self.episodes += 1;
        self.total_reward += reward;
        Ok(())
    }
}

/// One JSONL record written per completed episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeLogRecord {
    pub episode: usize,
    pub length: usize,
    pub reward: f64,
}

/// JSONL observer - writes one episode record per line
pub struct EpisodeLogObserver {
    writer: BufWriter<File>,
}

impl EpisodeLogObserver {
    /// Create an observer writing to the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create file: {}", path.as_ref().display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for EpisodeLogObserver {
    fn on_episode_end(&mut self, episode: usize, length: usize, reward: f64) -> Result<()> {
        let record = EpisodeLogRecord {
            episode,
            length,
            reward,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n").map_err(|source| Error::Io {
            operation: "write episode log record".to_string(),
            source,
        })?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| Error::Io {
            operation: "flush episode log".to_string(),
            source,
        })?;
        Ok(())
    }
}
