//! Cliff-walking gridworld
//!
//! The classic 4x12 undiscounted episodic task: start in the bottom-left
//! corner, goal in the bottom-right, with a cliff along the bottom edge
//! between them. Every step costs -1; stepping into the cliff costs -100
//! and teleports back to the start without ending the episode. Only the
//! goal is terminal.

use crate::{
    error::{Error, Result},
    ports::{Environment, Transition},
};

pub const ROWS: usize = 4;
pub const COLS: usize = 12;
pub const NUM_ACTIONS: usize = 4;

pub const UP: usize = 0;
pub const RIGHT: usize = 1;
pub const DOWN: usize = 2;
pub const LEFT: usize = 3;

const START: usize = (ROWS - 1) * COLS;
const GOAL: usize = ROWS * COLS - 1;

/// Deterministic cliff-walking environment with `usize` cell-index states
#[derive(Debug, Clone)]
pub struct CliffWalking {
    position: usize,
}

impl CliffWalking {
    pub fn new() -> Self {
        Self { position: START }
    }

    /// Starting cell index (bottom-left corner)
    pub fn start() -> usize {
        START
    }

    /// Goal cell index (bottom-right corner)
    pub fn goal() -> usize {
        GOAL
    }

    fn coords(state: usize) -> (usize, usize) {
        (state / COLS, state % COLS)
    }

    fn index(row: usize, col: usize) -> usize {
        row * COLS + col
    }

    fn is_cliff(state: usize) -> bool {
        let (row, col) = Self::coords(state);
        row == ROWS - 1 && col > 0 && col < COLS - 1
    }
}

impl Default for CliffWalking {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for CliffWalking {
    type State = usize;

    fn reset(&mut self) -> Result<usize> {
        self.position = START;
        Ok(self.position)
    }

    fn step(&mut self, action: usize) -> Result<Transition<usize>> {
        if action >= NUM_ACTIONS {
            return Err(Error::InvalidAction {
                action,
                num_actions: NUM_ACTIONS,
            });
        }

        let (row, col) = Self::coords(self.position);
        // Moves off the grid leave the position unchanged
        let (next_row, next_col) = match action {
            UP => (row.saturating_sub(1), col),
            RIGHT => (row, (col + 1).min(COLS - 1)),
            DOWN => ((row + 1).min(ROWS - 1), col),
            _ => (row, col.saturating_sub(1)),
        };
        let target = Self::index(next_row, next_col);

        let transition = if Self::is_cliff(target) {
            Transition {
                next_state: START,
                reward: -100.0,
                done: false,
            }
        } else {
            Transition {
                next_state: target,
                reward: -1.0,
                done: target == GOAL,
            }
        };
        self.position = transition.next_state;
        Ok(transition)
    }

    fn num_actions(&self) -> usize {
        NUM_ACTIONS
    }
}
