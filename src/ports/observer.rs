//! Observer port - abstraction for training observation
//!
//! Observers can be composed to collect different kinds of data during
//! training without coupling the learning loop to specific output formats.
//! Examples include progress bars for user feedback, JSONL export for
//! analysis, and running metrics.

use crate::error::Result;

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(num_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - for each environment step, after the Q update
///    - `on_episode_end(episode, length, reward)`
/// 3. `on_training_end()` - once at the end
///
/// All methods have default no-op implementations; implementors override
/// only the events they care about.
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Parameters
    ///
    /// * `num_episodes` - Total number of episodes that will be run
    fn on_training_start(&mut self, _num_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each environment step.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode (0-based)
    /// * `step` - Step index within the episode (0-based)
    /// * `action` - Action id that was sampled
    /// * `probs` - Action-probability distribution the action was drawn from
    /// * `reward` - Reward received for the transition
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _action: usize,
        _probs: &[f64],
        _reward: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode terminates.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the completed episode
    /// * `length` - Index of the terminal step
    /// * `reward` - Cumulative reward over the episode
    fn on_episode_end(&mut self, _episode: usize, _length: usize, _reward: f64) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, flush files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
