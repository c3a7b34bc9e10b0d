//! Greedy evaluation of a learned Q-table

use crate::{
    error::Result,
    ports::Environment,
    q_table::QTable,
};

/// One step of a greedy rollout
#[derive(Debug, Clone)]
pub struct RolloutStep<S> {
    /// State the action was taken in
    pub state: S,
    /// Greedy action taken
    pub action: usize,
    /// Reward received
    pub reward: f64,
}

/// Trajectory produced by following the greedy policy
#[derive(Debug, Clone)]
pub struct GreedyRollout<S> {
    pub steps: Vec<RolloutStep<S>>,
    pub total_reward: f64,
    /// Whether the environment signaled termination within the step budget
    pub reached_terminal: bool,
}

/// Run one episode following the greedy (argmax) policy of a learned table
///
/// Unlike training, evaluation bounds the episode at `max_steps`: a greedy
/// policy over a partially learned table can cycle, and evaluation should
/// report that rather than hang.
pub fn greedy_rollout<E: Environment>(
    env: &mut E,
    q_table: &QTable<E::State>,
    max_steps: usize,
) -> Result<GreedyRollout<E::State>> {
    let mut state = env.reset()?;
    let mut steps = Vec::new();
    let mut total_reward = 0.0;
    let mut reached_terminal = false;

    for _ in 0..max_steps {
        let action = q_table.greedy_action(&state);
        let transition = env.step(action)?;
        total_reward += transition.reward;
        steps.push(RolloutStep {
            state,
            action,
            reward: transition.reward,
        });
        if transition.done {
            reached_terminal = true;
            break;
        }
        state = transition.next_state;
    }

    Ok(GreedyRollout {
        steps,
        total_reward,
        reached_terminal,
    })
}
