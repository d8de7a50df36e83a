// src/world.rs
//
// The base grid transition engine.
//
// GridWorld precomputes a dense state x action transition table and a dense
// reward vector at construction, then answers every transition query by pure
// table lookup. It holds no mutable state after construction and can be
// shared read-only across concurrent callers.

use crate::config::GridConfig;
use crate::types::{Action, Reward, State, Step, World};

/// A deterministic 2D grid-world transition oracle.
///
/// States are row-major cell indices. Every state admits the four actions
/// {left, right, up, down}; a move that would leave the grid, or cross a row
/// boundary for a horizontal move, leaves the state unchanged. The reward of
/// a transition is always the reward-table entry for the *resulting* state,
/// including for no-op transitions.
///
/// # Panics
///
/// Construction panics on a zero-sized grid and on reward overrides keyed by
/// out-of-range states. `transition` panics on an out-of-range state (and on
/// any out-of-range entry in a caller-supplied transition table).
/// Out-of-range inputs are a programming error; failing loudly is deliberate.
///
/// # Example
///
/// ```
/// use gridworld::{Action, GridConfig, GridWorld, World};
///
/// let mut config = GridConfig::new(4, 4);
/// config.rewards = [(0, 0.0), (5, -3.0)].into_iter().collect();
/// config.default_reward = -1.0;
/// let world = GridWorld::new(&config);
///
/// let step = world.transition(4, Action::Right);
/// assert_eq!((step.state, step.reward), (5, -3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorld {
    rows: usize,
    cols: usize,
    reward_table: Vec<Reward>,
    transition_table: Vec<[State; 4]>,
}

impl GridWorld {
    /// Build the engine from a config, deriving the reward vector and (unless
    /// the config supplies a pre-built one) the transition table.
    pub fn new(config: &GridConfig) -> Self {
        assert!(
            config.rows >= 1 && config.cols >= 1,
            "grid geometry must be at least 1x1, got {}x{}",
            config.rows,
            config.cols
        );

        let num_states = config.num_states();
        if let Some((&state, _)) = config.rewards.range(num_states..).next() {
            panic!(
                "reward override for out-of-range state {} on a {}x{} grid ({} states)",
                state, config.rows, config.cols, num_states
            );
        }

        let reward_table: Vec<Reward> = (0..num_states)
            .map(|state| {
                config
                    .rewards
                    .get(&state)
                    .copied()
                    .unwrap_or(config.default_reward)
            })
            .collect();

        // A caller-supplied table is adopted as-is, with no validation.
        let transition_table = match &config.transition_table {
            Some(table) => table.clone(),
            None => derive_transitions(config.rows, config.cols),
        };

        Self {
            rows: config.rows,
            cols: config.cols,
            reward_table,
            transition_table,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_states(&self) -> usize {
        self.rows * self.cols
    }

    /// Dense transition table, shape `(num_states, 4)`, indexed
    /// `[state][action]` with columns in {left, right, up, down} order.
    pub fn transition_table(&self) -> &[[State; 4]] {
        &self.transition_table
    }

    /// Dense reward vector of length `num_states`, indexed by state.
    pub fn reward_table(&self) -> &[Reward] {
        &self.reward_table
    }
}

impl World for GridWorld {
    fn transition(&self, state: State, action: Action) -> Step {
        let next = self.transition_table[state][action.index()];
        Step {
            state: next,
            reward: self.reward_table[next],
        }
    }
}

/// Derive the full transition table from grid geometry.
fn derive_transitions(rows: usize, cols: usize) -> Vec<[State; 4]> {
    (0..rows * cols)
        .map(|state| {
            [
                geometric_move(rows, cols, state, Action::Left),
                geometric_move(rows, cols, state, Action::Right),
                geometric_move(rows, cols, state, Action::Up),
                geometric_move(rows, cols, state, Action::Down),
            ]
        })
        .collect()
}

/// The geometric transition rule for a single (state, action) pair.
///
/// Horizontal moves are rejected (the state stays put) when the candidate
/// cell sits on a different row; vertical moves are rejected when the
/// candidate falls outside `[0, rows * cols)`. Rejection never wraps and
/// never errors.
fn geometric_move(rows: usize, cols: usize, state: State, action: Action) -> State {
    let num_states = rows * cols;
    match action {
        Action::Left => match state.checked_sub(1) {
            Some(candidate) if candidate / cols == state / cols => candidate,
            _ => state,
        },
        Action::Right => {
            let candidate = state + 1;
            if candidate / cols == state / cols {
                candidate
            } else {
                state
            }
        }
        Action::Up => match state.checked_sub(cols) {
            Some(candidate) => candidate,
            None => state,
        },
        Action::Down => {
            let candidate = state + cols;
            if candidate < num_states {
                candidate
            } else {
                state
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_by_two() -> GridWorld {
        let mut config = GridConfig::new(3, 2);
        config.rewards = [(2, -3.0), (4, -2.0), (5, -2.0)].into_iter().collect();
        config.default_reward = -1.0;
        GridWorld::new(&config)
    }

    #[test]
    fn three_by_two_scenario() {
        let world = three_by_two();

        assert_eq!(world.transition(0, Action::Left).state, 0);
        assert_eq!(world.transition(3, Action::Down).state, 5);
        assert_eq!(world.transition(4, Action::Up).state, 2);
        assert_eq!(world.transition(2, Action::Right).state, 3);
    }

    #[test]
    fn reward_is_for_the_resulting_state() {
        let world = three_by_two();

        // 3 -> 5 enters a -2 state.
        assert_eq!(world.transition(3, Action::Down).reward, -2.0);
        // 4 -> 2 enters a -3 state.
        assert_eq!(world.transition(4, Action::Up).reward, -3.0);
        // No-op transition rewards the origin state itself.
        assert_eq!(world.transition(0, Action::Left).reward, -1.0);
        assert_eq!(world.transition(5, Action::Down).reward, -2.0);
    }

    #[test]
    fn boundary_moves_are_no_ops() {
        let world = GridWorld::new(&GridConfig::new(4, 4));

        // Top row cannot move up, bottom row cannot move down.
        for state in 0..4 {
            assert_eq!(world.transition(state, Action::Up).state, state);
        }
        for state in 12..16 {
            assert_eq!(world.transition(state, Action::Down).state, state);
        }
        // First column cannot move left, last column cannot move right.
        for row in 0..4 {
            let first = row * 4;
            let last = row * 4 + 3;
            assert_eq!(world.transition(first, Action::Left).state, first);
            assert_eq!(world.transition(last, Action::Right).state, last);
        }
    }

    #[test]
    fn horizontal_moves_never_cross_rows() {
        let world = GridWorld::new(&GridConfig::new(3, 2));

        // 1 -> 2 would wrap onto the next row.
        assert_eq!(world.transition(1, Action::Right).state, 1);
        // 2 -> 1 would wrap onto the previous row.
        assert_eq!(world.transition(2, Action::Left).state, 2);
    }

    #[test]
    fn interior_moves_follow_row_major_order() {
        let world = GridWorld::new(&GridConfig::new(4, 4));

        assert_eq!(world.transition(5, Action::Left).state, 4);
        assert_eq!(world.transition(5, Action::Right).state, 6);
        assert_eq!(world.transition(5, Action::Up).state, 1);
        assert_eq!(world.transition(5, Action::Down).state, 9);
    }

    #[test]
    fn one_by_one_grid_is_fully_absorbing() {
        let world = GridWorld::new(&GridConfig::new(1, 1));
        for action in Action::ALL {
            assert_eq!(world.transition(0, action).state, 0);
        }
    }

    #[test]
    fn identical_configs_yield_identical_tables() {
        let a = three_by_two();
        let b = three_by_two();
        assert_eq!(a.transition_table(), b.transition_table());
        assert_eq!(a.reward_table(), b.reward_table());
    }

    #[test]
    fn supplied_transition_table_is_adopted_verbatim() {
        let mut config = GridConfig::new(1, 2);
        // Both states loop to state 0 under every action.
        config.transition_table = Some(vec![[0, 0, 0, 0], [0, 0, 0, 0]]);
        config.default_reward = 7.0;
        let world = GridWorld::new(&config);

        assert_eq!(world.transition(1, Action::Right).state, 0);
        assert_eq!(world.transition(1, Action::Right).reward, 7.0);
    }

    #[test]
    fn table_shape_matches_geometry() {
        let world = GridWorld::new(&GridConfig::new(5, 3));
        assert_eq!(world.transition_table().len(), 15);
        assert_eq!(world.reward_table().len(), 15);
    }

    #[test]
    #[should_panic]
    fn out_of_range_state_fails_loudly() {
        let world = GridWorld::new(&GridConfig::new(2, 2));
        let _ = world.transition(4, Action::Left);
    }

    #[test]
    #[should_panic]
    fn zero_sized_grid_is_rejected() {
        let _ = GridWorld::new(&GridConfig::new(0, 3));
    }

    #[test]
    #[should_panic(expected = "out-of-range state 99")]
    fn out_of_range_reward_key_is_rejected() {
        let mut config = GridConfig::new(2, 2);
        config.rewards.insert(99, 5.0);
        let _ = GridWorld::new(&config);
    }

    #[test]
    fn reward_key_at_the_last_state_is_accepted() {
        let mut config = GridConfig::new(2, 2);
        config.rewards.insert(3, 5.0);
        let world = GridWorld::new(&config);
        assert_eq!(world.reward_table()[3], 5.0);
    }
}
