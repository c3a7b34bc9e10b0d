//! End-to-end tests for the Q-learning training pipeline

use std::sync::{Arc, Mutex};

use qlearn::{
    Environment, Observer, Result, Transition,
    pipeline::{EpisodeLogObserver, EpisodeLogRecord, TrainingConfig, TrainingPipeline},
};

/// Deterministic 2-state, 2-action environment: action 0 moves state 0 to
/// state 1 with reward 1 and terminates; action 1 stays in state 0 with
/// reward 0.
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
fn test_two_state_convergence() {
    let config = TrainingConfig {
        num_episodes: 50,
        epsilon: 0.1,
        learning_rate: 0.5,
        discount_factor: 1.0,
        seed: Some(7),
        ..TrainingConfig::default()
    };

    let outcome = TrainingPipeline::new(config)
        .run(&mut TwoState::new())
        .unwrap();

    // The terminating action must be preferred
    assert!(outcome.q_table.value(&0, 0) > outcome.q_table.value(&0, 1));

    // Statistics invariants
    assert_eq!(outcome.stats.episode_lengths.len(), 50);
    assert_eq!(outcome.stats.episode_rewards.len(), 50);
    assert!(outcome.stats.episode_lengths.iter().all(|&l| l >= 0.0));
    assert!(outcome.stats.episode_rewards.iter().all(|&r| r >= 0.0));

    // Later episodes terminate almost immediately
    assert!(outcome.stats.mean_length_over_last(10) < 2.0);
}

#[test]
fn test_fixed_seed_runs_are_identical() {
    let run = |seed| {
        let config = TrainingConfig {
            num_episodes: 40,
            seed: Some(seed),
            ..TrainingConfig::default()
        };
        TrainingPipeline::new(config)
            .run(&mut TwoState::new())
            .unwrap()
    };

    let first = run(42);
    let second = run(42);

    assert_eq!(first.stats, second.stats);

    let entries = |outcome: &qlearn::TrainingOutcome<u32>| {
        let mut rows: Vec<(u32, Vec<f64>)> = outcome
            .q_table
            .iter()
            .map(|(&state, values)| (state, values.to_vec()))
            .collect();
        rows.sort_by_key(|(state, _)| *state);
        rows
    };
    assert_eq!(entries(&first), entries(&second));
}

#[derive(Default)]
struct EventCounts {
    training_start: usize,
    episode_start: usize,
    steps: usize,
    episode_end: usize,
    training_end: usize,
}

struct CountingObserver {
    counts: Arc<Mutex<EventCounts>>,
}

impl Observer for CountingObserver {
    fn on_training_start(&mut self, _num_episodes: usize) -> Result<()> {
        self.counts.lock().unwrap().training_start += 1;
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.counts.lock().unwrap().episode_start += 1;
        Ok(())
    }

    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _action: usize,
        probs: &[f64],
        _reward: f64,
    ) -> Result<()> {
        assert_eq!(probs.len(), 2);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        self.counts.lock().unwrap().steps += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _length: usize, _reward: f64) -> Result<()> {
        self.counts.lock().unwrap().episode_end += 1;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.counts.lock().unwrap().training_end += 1;
        Ok(())
    }
}

#[test]
fn test_observer_event_sequence() {
    let counts = Arc::new(Mutex::new(EventCounts::default()));
    let config = TrainingConfig {
        num_episodes: 5,
        seed: Some(3),
        ..TrainingConfig::default()
    };

    TrainingPipeline::new(config)
        .with_observer(Box::new(CountingObserver {
            counts: Arc::clone(&counts),
        }))
        .run(&mut TwoState::new())
        .unwrap();

    let counts = counts.lock().unwrap();
    assert_eq!(counts.training_start, 1);
    assert_eq!(counts.episode_start, 5);
    assert_eq!(counts.episode_end, 5);
    assert_eq!(counts.training_end, 1);
    // Every episode takes at least one step
    assert!(counts.steps >= 5);
}

#[test]
fn test_episode_log_observer_writes_one_record_per_episode() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    let path = temp_file.path().to_path_buf();

    let config = TrainingConfig {
        num_episodes: 10,
        seed: Some(456),
        ..TrainingConfig::default()
    };

    TrainingPipeline::new(config)
        .with_observer(Box::new(EpisodeLogObserver::new(&path).unwrap()))
        .run(&mut TwoState::new())
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<EpisodeLogRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 10);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.episode, i);
        assert_eq!(record.reward, 1.0);
    }
}
