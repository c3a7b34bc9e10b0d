//! Q-table implementation for temporal difference learning

use std::{collections::HashMap, hash::Hash};

use serde::{Deserialize, Serialize};

/// Q-table mapping states to per-action value vectors
///
/// Each state maps to a vector of `num_actions` estimated action values,
/// indexed by action id. States never visited read as all-zero vectors
/// without being inserted, matching the lazy-default semantics of the
/// tabular Q-learning algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable<S: Eq + Hash> {
    /// Action-value vectors keyed by state
    values: HashMap<S, Vec<f64>>,
    /// Number of discrete actions, fixed for the lifetime of the table
    num_actions: usize,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl<S: Eq + Hash + Clone> QTable<S> {
    /// Create a new, empty Q-table
    pub fn new(num_actions: usize, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            values: HashMap::new(),
            num_actions,
            learning_rate,
            discount_factor,
        }
    }

    /// Number of discrete actions per state
    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Get the Q-value for a state-action pair (0.0 for unseen states)
    ///
    /// # Panics
    ///
    /// Panics if `action` is outside `0..num_actions` for a visited state.
    pub fn value(&self, state: &S, action: usize) -> f64 {
        self.values.get(state).map_or(0.0, |row| row[action])
    }

    /// Get the full action-value vector for a state
    ///
    /// Unseen states yield a zero vector of length `num_actions`; the read
    /// does not insert anything into the table.
    pub fn action_values(&self, state: &S) -> Vec<f64> {
        self.values
            .get(state)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.num_actions])
    }

    /// Mutable access to a state's action-value vector, inserting a zero
    /// vector on first access
    pub fn action_values_mut(&mut self, state: &S) -> &mut [f64] {
        let num_actions = self.num_actions;
        self.values
            .entry(state.clone())
            .or_insert_with(|| vec![0.0; num_actions])
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: &S, action: usize, value: f64) {
        self.action_values_mut(state)[action] = value;
    }

    /// Maximum Q-value over all actions in a state (0.0 for unseen states)
    pub fn max_value(&self, state: &S) -> f64 {
        match self.values.get(state) {
            Some(row) => row.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
            None => 0.0,
        }
    }

    /// Greedy action for a state: argmax over the action-value vector
    ///
    /// Ties resolve to the lowest action index (first occurrence).
    pub fn greedy_action(&self, state: &S) -> usize {
        match self.values.get(state) {
            Some(row) => {
                let mut best = 0;
                for (action, &value) in row.iter().enumerate().skip(1) {
                    if value > row[best] {
                        best = action;
                    }
                }
                best
            }
            None => 0,
        }
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// A terminal `next_state` that was never visited contributes a maximum
    /// of 0.0 through the lazy default, so no terminal special case is
    /// needed.
    pub fn q_learning_update(&mut self, state: &S, action: usize, reward: f64, next_state: &S) {
        let current_q = self.value(state, action);
        let max_next_q = self.max_value(next_state);
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        self.set(state, action, current_q + self.learning_rate * td_error);
    }

    /// Number of states with stored value vectors
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether any state has been visited yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over stored (state, action-values) entries
    pub fn iter(&self) -> impl Iterator<Item = (&S, &[f64])> {
        self.values.iter().map(|(state, row)| (state, row.as_slice()))
    }
}
