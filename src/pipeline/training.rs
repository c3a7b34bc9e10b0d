//! Q-learning training loop
//!
//! Off-policy TD control: finds the optimal greedy policy while following an
//! epsilon-greedy behavior policy. The pipeline owns the Q-table and the
//! per-episode statistics for the duration of a run and returns both to the
//! caller.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    policy::{EpsilonGreedy, sample_action},
    ports::{Environment, Observer},
    q_table::QTable,
    stats::EpisodeStats,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to run
    pub num_episodes: usize,

    /// Discount factor γ
    pub discount_factor: f64,

    /// TD learning rate α
    pub learning_rate: f64,

    /// Exploration rate ε
    pub epsilon: f64,

    /// Random seed for reproducibility
    pub seed: Option<u64>,

    /// Optional per-episode step cap
    ///
    /// `None` keeps the unbounded step loop: an environment that never
    /// signals termination hangs the run inside that episode. `Some(cap)`
    /// aborts the run with `EpisodeTruncated` instead.
    pub max_steps: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 500,
            discount_factor: 1.0,
            learning_rate: 0.5,
            epsilon: 0.1,
            seed: None,
            max_steps: None,
        }
    }
}

impl TrainingConfig {
    /// Validate parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for `num_episodes == 0`,
    /// `discount_factor` outside `[0, 1]`, `learning_rate` outside `(0, 1]`
    /// or `epsilon` outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.num_episodes == 0 {
            return Err(Error::invalid_parameter(
                "num_episodes",
                self.num_episodes,
                "num_episodes > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::invalid_parameter(
                "discount_factor",
                self.discount_factor,
                "0 <= discount_factor <= 1",
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::invalid_parameter(
                "learning_rate",
                self.learning_rate,
                "0 < learning_rate <= 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::invalid_parameter("epsilon", self.epsilon, "0 <= epsilon <= 1"));
        }
        Ok(())
    }
}

/// Result of a training run: the learned Q-table and per-episode statistics
#[derive(Debug, Clone)]
pub struct TrainingOutcome<S: Eq + std::hash::Hash> {
    pub q_table: QTable<S>,
    pub stats: EpisodeStats,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Training pipeline driving episodes against an environment
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run Q-learning for the configured number of episodes
    ///
    /// Each episode: reset the environment, then repeatedly query the
    /// epsilon-greedy policy for the current state, sample an action, step
    /// the environment, apply the TD update and record statistics, until
    /// the environment signals termination. Episodes and steps are strictly
    /// sequential; every step reads the table as updated by the previous
    /// one.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid configuration, on any environment error, and
    /// on exceeding the optional step cap. A failed run yields no partial
    /// Q-table.
    pub fn run<E: Environment>(&mut self, env: &mut E) -> Result<TrainingOutcome<E::State>> {
        self.config.validate()?;
        let num_actions = env.num_actions();
        if num_actions == 0 {
            return Err(Error::invalid_parameter("num_actions", num_actions, "num_actions > 0"));
        }

        let mut rng = build_rng(self.config.seed);
        let mut q_table = QTable::new(
            num_actions,
            self.config.learning_rate,
            self.config.discount_factor,
        );
        let mut stats = EpisodeStats::new(self.config.num_episodes);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        for episode in 0..self.config.num_episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let mut state = env.reset()?;
            let mut step = 0;

            loop {
                // The policy borrows the live table; rebuilding it per step
                // keeps it reading the values updated by the previous step.
                let policy = EpsilonGreedy::new(&q_table, self.config.epsilon)?;
                let probs = policy.distribution(&state);
                let action = sample_action(&probs, &mut rng);

                let transition = env.step(action)?;

                q_table.q_learning_update(&state, action, transition.reward, &transition.next_state);
                stats.record_step(episode, step, transition.reward);

                for observer in &mut self.observers {
                    observer.on_step(episode, step, action, &probs, transition.reward)?;
                }

                if transition.done {
                    break;
                }
                if let Some(max_steps) = self.config.max_steps {
                    if step + 1 >= max_steps {
                        return Err(Error::EpisodeTruncated { episode, max_steps });
                    }
                }
                state = transition.next_state;
                step += 1;
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, step, stats.episode_rewards[episode])?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingOutcome { q_table, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Transition;

    /// Two-state environment: action 0 moves 0 -> 1 with reward 1 and
    /// terminates; action 1 stays in 0 with reward 0.
    struct TwoState {
        state: u32,
    }

    impl TwoState {
        fn new() -> Self {
            Self { state: 0 }
        }
    }

    impl Environment for TwoState {
        type State = u32;

        fn reset(&mut self) -> Result<u32> {
            self.state = 0;
            Ok(self.state)
        }

        fn step(&mut self, action: usize) -> Result<Transition<u32>> {
            let (next_state, reward, done) = match action {
                0 => (1, 1.0, true),
                _ => (0, 0.0, false),
            };
            self.state = next_state;
            Ok(Transition {
                next_state,
                reward,
                done,
            })
        }

        fn num_actions(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_two_state_run_learns_terminating_action() {
        let config = TrainingConfig {
            num_episodes: 50,
            seed: Some(42),
            ..TrainingConfig::default()
        };

        let mut pipeline = TrainingPipeline::new(config);
        let outcome = pipeline.run(&mut TwoState::new()).unwrap();

        assert!(outcome.q_table.value(&0, 0) > outcome.q_table.value(&0, 1));
        assert_eq!(outcome.stats.num_episodes(), 50);
        // Every episode ends with the terminal reward of 1
        assert!(outcome.stats.episode_rewards.iter().all(|&r| r == 1.0));
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        let bad = [
            TrainingConfig {
                num_episodes: 0,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                epsilon: 1.5,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                learning_rate: 0.0,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                discount_factor: -0.1,
                ..TrainingConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_run_fails_on_invalid_config() {
        let config = TrainingConfig {
            epsilon: 2.0,
            ..TrainingConfig::default()
        };
        let result = TrainingPipeline::new(config).run(&mut TwoState::new());
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }

    /// Environment that never signals termination.
    struct NeverDone;

    impl Environment for NeverDone {
        type State = u32;

        fn reset(&mut self) -> Result<u32> {
            Ok(0)
        }

        fn step(&mut self, _action: usize) -> Result<Transition<u32>> {
            Ok(Transition {
                next_state: 0,
                reward: 0.0,
                done: false,
            })
        }

        fn num_actions(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_step_cap_truncates_non_terminating_episode() {
        let config = TrainingConfig {
            num_episodes: 1,
            max_steps: Some(10),
            seed: Some(1),
            ..TrainingConfig::default()
        };
        let result = TrainingPipeline::new(config).run(&mut NeverDone);
        assert!(matches!(
            result,
            Err(Error::EpisodeTruncated {
                episode: 0,
                max_steps: 10
            })
        ));
    }
}
