// src/config.rs
//
// Construction parameters for the grid transition engine.
//
// This is the single source of truth for an environment's geometry and
// reward structure. Effects carry their own configuration (see effects.rs);
// everything here feeds GridWorld construction only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Reward, State};

/// Configuration for a [`GridWorld`](crate::world::GridWorld).
///
/// The reward and transition tables are derived from this once at
/// construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of grid rows. Must be >= 1.
    pub rows: usize,
    /// Number of grid columns. Must be >= 1.
    pub cols: usize,
    /// Explicit per-state rewards. States absent from this map fall back to
    /// `default_reward`. Keys must lie in `[0, rows * cols)`; construction
    /// rejects out-of-range keys.
    #[serde(default)]
    pub rewards: BTreeMap<State, Reward>,
    /// Reward for every state without an explicit entry in `rewards`.
    #[serde(default)]
    pub default_reward: Reward,
    /// Optional pre-built transition table, shape `(rows * cols, 4)` with
    /// columns in {left, right, up, down} order.
    ///
    /// When supplied it is adopted verbatim and no validation is performed;
    /// a malformed table propagates into the reward lookup downstream.
    #[serde(default)]
    pub transition_table: Option<Vec<[State; 4]>>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            rewards: BTreeMap::new(),
            default_reward: 0.0,
            transition_table: None,
        }
    }
}

impl GridConfig {
    /// Config for a `rows x cols` grid with all-default rewards.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Total number of states in the grid.
    pub fn num_states(&self) -> usize {
        self.rows * self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_four_by_four() {
        let config = GridConfig::default();
        assert_eq!(config.rows, 4);
        assert_eq!(config.cols, 4);
        assert_eq!(config.num_states(), 16);
        assert!(config.rewards.is_empty());
        assert_eq!(config.default_reward, 0.0);
        assert!(config.transition_table.is_none());
    }

    #[test]
    fn new_sets_geometry_only() {
        let config = GridConfig::new(3, 2);
        assert_eq!(config.num_states(), 6);
        assert!(config.rewards.is_empty());
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = GridConfig::new(3, 2);
        config.rewards.insert(2, -3.0);
        config.default_reward = -1.0;

        let json = serde_json::to_string(&config).unwrap();
        let parsed: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
