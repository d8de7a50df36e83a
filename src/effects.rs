// src/effects.rs
//
// Composable environment effects.
//
// An effect rewrites one (state, action, reward) triple around a base
// transition it computes itself from a supplied transition source. The
// variant set is closed: jump tiles, forbidden tiles, and edge penalties.
// Compound environments are built by nesting variational worlds, not by
// growing this set.
//
// Compatibility note: JumpEffect and BlockEffect substitute the reward
// threaded through the effect pipeline for the source's freshly computed
// reward in their pass-through branches. The source's reward is discarded
// even when nothing is redirected or blocked. This mirrors the reference
// behaviour exactly and is preserved as-is; see DESIGN.md.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::{Action, Reward, State, StepBuffer, World};

/// A penalty is either one scalar applied to every state, or a per-state
/// mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Penalty {
    Scalar(Reward),
    PerState(BTreeMap<State, Reward>),
}

impl Penalty {
    /// Penalty for a given state key: the scalar for any state, or the
    /// mapping's entry. None when the key is absent from a mapping; callers
    /// fall back to their passed-through reward in that case.
    pub fn lookup(&self, state: State) -> Option<Reward> {
        match self {
            Penalty::Scalar(value) => Some(*value),
            Penalty::PerState(map) => map.get(&state).copied(),
        }
    }
}

/// Redirects transitions that land on a jump-source tile to a destination
/// tile.
///
/// After the source transition resolves, a resulting state that is a key in
/// the jump map is replaced by its mapped destination. With a penalty
/// configured, the reward is overridden by the penalty entry for the
/// *destination* state. Jumps never chain: the destination is not looked up
/// again within the same call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpEffect {
    /// Jump-source state -> destination state.
    pub jumps: BTreeMap<State, State>,
    pub penalty: Option<Penalty>,
}

impl JumpEffect {
    pub fn new(jumps: BTreeMap<State, State>) -> Self {
        Self {
            jumps,
            penalty: None,
        }
    }

    pub fn with_penalty(jumps: BTreeMap<State, State>, penalty: Penalty) -> Self {
        Self {
            jumps,
            penalty: Some(penalty),
        }
    }

    fn apply(
        &self,
        source: &dyn World,
        state: State,
        action: Action,
        reward: Reward,
        _buf: &StepBuffer,
    ) -> (State, Action, Reward) {
        let step = source.transition(state, action);
        // The source's computed reward is discarded in favour of the reward
        // threaded through the pipeline (see module compatibility note).
        let mut new_state = step.state;
        let mut new_reward = reward;

        if let Some(&dest) = self.jumps.get(&step.state) {
            new_state = dest;
            if let Some(penalty) = &self.penalty {
                new_reward = penalty.lookup(dest).unwrap_or(reward);
            }
        }

        (new_state, action, new_reward)
    }
}

/// Forbids entering a set of tiles.
///
/// A source transition that lands on a blocked state is reverted to the
/// state the move started from. With a penalty configured, the reward is
/// overridden by the penalty entry for the *reverted* (origin) state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEffect {
    pub blocked: BTreeSet<State>,
    pub penalty: Option<Penalty>,
}

impl BlockEffect {
    pub fn new(blocked: BTreeSet<State>) -> Self {
        Self {
            blocked,
            penalty: None,
        }
    }

    pub fn with_penalty(blocked: BTreeSet<State>, penalty: Penalty) -> Self {
        Self {
            blocked,
            penalty: Some(penalty),
        }
    }

    fn apply(
        &self,
        source: &dyn World,
        state: State,
        action: Action,
        reward: Reward,
        _buf: &StepBuffer,
    ) -> (State, Action, Reward) {
        let step = source.transition(state, action);
        let mut new_state = step.state;
        let mut new_reward = reward;

        if self.blocked.contains(&step.state) {
            new_state = state;
            if let Some(penalty) = &self.penalty {
                new_reward = penalty.lookup(state).unwrap_or(reward);
            }
        }

        (new_state, action, new_reward)
    }
}

/// Penalizes no-op transitions.
///
/// When the source transition returns the state it started from (a grid
/// boundary, or an upstream effect reverting the move), the reward is
/// overridden by the penalty entry for that state. The returned state is
/// always the effect's input state; only the reward ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEffect {
    pub penalty: Penalty,
}

impl EdgeEffect {
    pub fn new(penalty: Penalty) -> Self {
        Self { penalty }
    }

    fn apply(
        &self,
        source: &dyn World,
        state: State,
        action: Action,
        _reward: Reward,
        _buf: &StepBuffer,
    ) -> (State, Action, Reward) {
        let step = source.transition(state, action);
        let mut new_reward = step.reward;

        if step.state == state {
            new_reward = self.penalty.lookup(state).unwrap_or(step.reward);
        }

        (state, action, new_reward)
    }
}

/// The closed set of environment effects.
///
/// Every variant is a pure transform over `(state, action, reward, buffer)`
/// plus its own immutable configuration. The transition source is passed in
/// by the orchestrator at call time rather than owned by the effect, so one
/// effect value can serve any world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Jump(JumpEffect),
    Block(BlockEffect),
    Edge(EdgeEffect),
}

impl Effect {
    /// Apply this effect around one transition of `source`.
    ///
    /// Used as a pre-effect, only the returned (state, action) are honored
    /// downstream; as a post-effect, the returned (state, reward) are honored
    /// and the action passes through unchanged.
    pub fn apply(
        &self,
        source: &dyn World,
        state: State,
        action: Action,
        reward: Reward,
        buf: &StepBuffer,
    ) -> (State, Action, Reward) {
        match self {
            Effect::Jump(effect) => effect.apply(source, state, action, reward, buf),
            Effect::Block(effect) => effect.apply(source, state, action, reward, buf),
            Effect::Edge(effect) => effect.apply(source, state, action, reward, buf),
        }
    }
}
