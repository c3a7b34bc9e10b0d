//! Serialization support for trained runs.

use std::{
    fs::File,
    hash::Hash,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    pipeline::{TrainingConfig, TrainingOutcome},
    q_table::QTable,
    stats::EpisodeStats,
};

/// Versioned on-disk artifact for a completed training run
///
/// Persisted as MessagePack: the Q-table is a map with arbitrary
/// (non-string) state keys, which JSON map encoding cannot represent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRun<S: Eq + Hash> {
    pub version: u32,
    pub config: TrainingConfig,
    q_table: QTable<S>,
    stats: EpisodeStats,
}

impl<S: Eq + Hash + Clone> SavedRun<S> {
    pub const VERSION: u32 = 1;

    /// Capture a finished run together with the configuration that produced it
    pub fn new(config: TrainingConfig, outcome: &TrainingOutcome<S>) -> Self {
        Self {
            version: Self::VERSION,
            config,
            q_table: outcome.q_table.clone(),
            stats: outcome.stats.clone(),
        }
    }

    /// Unpack into the Q-table and statistics, checking the format version
    pub fn into_outcome(self) -> Result<TrainingOutcome<S>> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        Ok(TrainingOutcome {
            q_table: self.q_table,
            stats: self.stats,
        })
    }
}

impl<S: Eq + Hash + Serialize> SavedRun<S> {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize run")?;

        Ok(())
    }
}

impl<S: Eq + Hash + DeserializeOwned> SavedRun<S> {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize run")
    }
}
