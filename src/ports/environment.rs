//! Environment port - abstraction over the MDP being learned against

use std::hash::Hash;

use crate::error::Result;

/// One observed environment transition
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    /// State the environment moved to
    pub next_state: S,
    /// Reward received for the transition
    pub reward: f64,
    /// Whether the episode terminated on this step
    pub done: bool,
}

/// Environment trait - the collaborator the learning loop drives
///
/// The learning core depends only on this abstraction: a way to reset to an
/// initial state, a way to advance one transition, and a fixed discrete
/// action count. States are opaque to the core; they only need to work as
/// Q-table keys.
///
/// # Contract
///
/// * `reset` must be callable repeatedly across episodes with no cleanup by
///   the caller.
/// * `step` takes an action id in `0..num_actions()` and returns the
///   resulting transition.
/// * `num_actions` is fixed for the lifetime of the instance.
///
/// Errors raised by `reset` or `step` propagate unchanged through the
/// learning loop and abort the run; there are no retries and no partial
/// results.
///
/// # Examples
///
/// ```no_run
/// use qlearn::ports::{Environment, Transition};
///
/// struct Coin;
///
/// impl Environment for Coin {
///     type State = u8;
///
///     fn reset(&mut self) -> qlearn::Result<u8> {
///         Ok(0)
///     }
///
///     fn step(&mut self, action: usize) -> qlearn::Result<Transition<u8>> {
///         Ok(Transition {
///             next_state: 1,
///             reward: if action == 0 { 1.0 } else { 0.0 },
///             done: true,
///         })
///     }
///
///     fn num_actions(&self) -> usize {
///         2
///     }
/// }
/// ```
pub trait Environment {
    /// Observation type, used as the Q-table key
    type State: Clone + Eq + Hash;

    /// Reset to an initial state and return it
    fn reset(&mut self) -> Result<Self::State>;

    /// Advance one transition with the given action id
    fn step(&mut self, action: usize) -> Result<Transition<Self::State>>;

    /// Number of discrete actions, fixed for the lifetime of the instance
    fn num_actions(&self) -> usize;
}
