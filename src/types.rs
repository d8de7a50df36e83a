// src/types.rs
//
// Common shared types for the grid-world transition oracle.

use serde::{Deserialize, Serialize};

/// Index of a grid cell, enumerated in row-major order:
/// `state = row * cols + col`, in `[0, rows * cols)`.
pub type State = usize;

/// Reward received for entering a state.
pub type Reward = f64;

/// One of the four moves available in every state.
///
/// The numeric encoding (left=0, right=1, up=2, down=3) is fixed and
/// matches the column order of the dense transition table. Serialized
/// records use the lowercase names from [`as_str`](Action::as_str).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
}

impl Action {
    /// All actions, in table-column order.
    pub const ALL: [Action; 4] = [Action::Left, Action::Right, Action::Up, Action::Down];

    /// Column index of this action in the transition table.
    pub fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Up => 2,
            Action::Down => 3,
        }
    }

    /// Parse a table-column index. Returns None if out of range.
    pub fn from_index(index: usize) -> Option<Action> {
        Action::ALL.get(index).copied()
    }

    /// Return a stable lowercase name for the action (used in logs/records).
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
        }
    }
}

/// Result of a single transition: the state entered and the reward for
/// entering it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub state: State,
    pub reward: Reward,
}

/// The (state, action, reward) triple captured between the pre-effect and
/// post-effect stages of one variational transition.
///
/// This is a call-local value threaded through a single transition. It is
/// never retained across calls, so sharing a world between callers cannot
/// leak one call's stage output into another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepBuffer {
    pub state: State,
    pub action: Action,
    pub reward: Reward,
}

/// A transition oracle: maps (state, action) to (new state, reward).
///
/// Implemented by [`GridWorld`](crate::world::GridWorld) and by
/// [`VariationalWorld`](crate::variational::VariationalWorld), so a
/// variational world can substitute for the base engine anywhere one is
/// expected, including as the transition source an effect calls into.
pub trait World {
    fn transition(&self, state: State, action: Action) -> Step;
}
