//! Epsilon-greedy action selection
//!
//! The behavior policy blends a uniform exploration term with a point mass
//! on the greedy action. It holds a shared borrow of the live Q-table, so a
//! policy value built inside the learning loop always reads the current
//! value estimates.

use std::hash::Hash;

use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};

use crate::{
    error::{Error, Result},
    q_table::QTable,
};

/// Epsilon-greedy policy over a Q-table
///
/// Assigns probability `epsilon / num_actions` to every action, plus
/// `1 - epsilon` to the greedy action (lowest index on ties). Cheap to
/// construct; the learning loop rebuilds one per step against the current
/// table.
#[derive(Debug)]
pub struct EpsilonGreedy<'a, S: Eq + Hash> {
    q_table: &'a QTable<S>,
    epsilon: f64,
}

impl<'a, S: Eq + Hash + Clone> EpsilonGreedy<'a, S> {
    /// Create a policy bound to the given Q-table
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `epsilon` is outside `[0, 1]` or the
    /// table's action space is empty.
    pub fn new(q_table: &'a QTable<S>, epsilon: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::invalid_parameter("epsilon", epsilon, "0 <= epsilon <= 1"));
        }
        if q_table.num_actions() == 0 {
            return Err(Error::invalid_parameter(
                "num_actions",
                q_table.num_actions(),
                "num_actions > 0",
            ));
        }
        Ok(Self { q_table, epsilon })
    }

    /// Action-probability distribution for a state
    ///
    /// The result has length `num_actions`, is non-negative everywhere and
    /// sums to 1. Reading an unseen state leaves the table untouched.
    pub fn distribution(&self, state: &S) -> Vec<f64> {
        let num_actions = self.q_table.num_actions();
        let mut probs = vec![self.epsilon / num_actions as f64; num_actions];
        probs[self.q_table.greedy_action(state)] += 1.0 - self.epsilon;
        probs
    }

    /// Sample one action for a state from the full distribution
    pub fn sample<R: Rng + ?Sized>(&self, state: &S, rng: &mut R) -> usize {
        sample_action(&self.distribution(state), rng)
    }
}

/// Draw an action index from an action-probability distribution
///
/// The sample space is the length of `probs`, i.e. the policy's
/// `num_actions`.
pub fn sample_action<R: Rng + ?Sized>(probs: &[f64], rng: &mut R) -> usize {
    WeightedIndex::new(probs)
        .expect("action distribution is non-empty, non-negative and sums to 1")
        .sample(rng)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn table_with(values: &[(u32, usize, f64)], num_actions: usize) -> QTable<u32> {
        let mut qtable = QTable::new(num_actions, 0.5, 1.0);
        for &(state, action, value) in values {
            qtable.set(&state, action, value);
        }
        qtable
    }

    #[test]
    fn test_greedy_point_mass_with_zero_epsilon() {
        let qtable = table_with(&[(0, 0, 0.5), (0, 1, 2.0), (0, 2, 1.0)], 3);
        let policy = EpsilonGreedy::new(&qtable, 0.0).unwrap();
        assert_eq!(policy.distribution(&0), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_zero_epsilon_ties_break_to_lowest_index() {
        let qtable = table_with(&[(0, 1, 3.0), (0, 2, 3.0)], 4);
        let policy = EpsilonGreedy::new(&qtable, 0.0).unwrap();
        assert_eq!(policy.distribution(&0), vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_uniform_with_epsilon_one() {
        let qtable = table_with(&[(0, 1, 5.0)], 4);
        let policy = EpsilonGreedy::new(&qtable, 1.0).unwrap();
        assert_eq!(policy.distribution(&0), vec![0.25; 4]);
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let qtable = table_with(&[(0, 2, 1.0)], 5);
        let policy = EpsilonGreedy::new(&qtable, 0.3).unwrap();
        let probs = policy.distribution(&0);
        assert!(probs.iter().all(|&p| p >= 0.0));
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_state_is_read_only() {
        let qtable: QTable<u32> = QTable::new(3, 0.5, 1.0);
        let policy = EpsilonGreedy::new(&qtable, 0.1).unwrap();
        let probs = policy.distribution(&17);
        // greedy action on a zero vector is action 0
        assert!((probs[0] - (0.9 + 0.1 / 3.0)).abs() < 1e-12);
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_policy_construction_is_idempotent() {
        let qtable = table_with(&[(0, 1, 2.0), (1, 0, 4.0)], 3);
        let first = EpsilonGreedy::new(&qtable, 0.2).unwrap();
        let second = EpsilonGreedy::new(&qtable, 0.2).unwrap();
        assert_eq!(first.distribution(&0), second.distribution(&0));
        assert_eq!(first.distribution(&1), second.distribution(&1));
    }

    #[test]
    fn test_rejects_out_of_range_epsilon() {
        let qtable: QTable<u32> = QTable::new(2, 0.5, 1.0);
        assert!(EpsilonGreedy::new(&qtable, -0.1).is_err());
        assert!(EpsilonGreedy::new(&qtable, 1.1).is_err());
    }

    #[test]
    fn test_sample_respects_point_mass() {
        let qtable = table_with(&[(0, 2, 1.0)], 3);
        let policy = EpsilonGreedy::new(&qtable, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            assert_eq!(policy.sample(&0, &mut rng), 2);
        }
    }
}
