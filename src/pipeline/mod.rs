//! Training pipeline: the Q-learning loop, bundled observers, and greedy
//! evaluation of learned tables.

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{GreedyRollout, RolloutStep, greedy_rollout};
pub use observers::{EpisodeLogObserver, EpisodeLogRecord, MetricsObserver, ProgressObserver};
pub use training::{TrainingConfig, TrainingOutcome, TrainingPipeline};
