// src/variational.rs
//
// The variational world orchestrator.
//
// Wraps one base world with an optional pre-effect and an optional
// post-effect, exposing the same (state, action) -> (state, reward) contract
// as the base engine. Because VariationalWorld itself implements World, it
// nests: compound environments (jump + block in one transition, say) are
// built by stacking variational worlds.

use crate::effects::Effect;
use crate::types::{Action, Reward, State, Step, StepBuffer, World};

/// A world variant: base transitions surrounded by a two-stage effect
/// pipeline.
///
/// Per transition:
/// 1. The pre-effect, if any, rewrites (state, action); its output triple is
///    captured in a call-local [`StepBuffer`].
/// 2. The base world resolves the stage-1 (state, action).
/// 3. The post-effect, if any, rewrites (state, reward) given the stage-1
///    inputs and the raw reward; with no post-effect the stage-2 result is
///    adopted directly.
///
/// The buffer is a local value threaded through one call, never instance
/// state, so a shared instance is safe for concurrent and reentrant use.
///
/// # Example
///
/// ```
/// use gridworld::{
///     Action, Effect, GridConfig, GridWorld, JumpEffect, VariationalWorld, World,
/// };
///
/// let mut config = GridConfig::new(4, 4);
/// config.default_reward = -1.0;
/// let base = GridWorld::new(&config);
/// let jumps = [(11, 13)].into_iter().collect();
/// let world = VariationalWorld::new(base)
///     .with_post_effect(Effect::Jump(JumpEffect::new(jumps)));
///
/// let step = world.transition(10, Action::Right);
/// assert_eq!((step.state, step.reward), (13, -1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VariationalWorld<W: World> {
    base: W,
    pre_effect: Option<Effect>,
    post_effect: Option<Effect>,
}

impl<W: World> VariationalWorld<W> {
    /// Wrap a base world with no effects. Until effects are attached this
    /// behaves exactly like the base world.
    pub fn new(base: W) -> Self {
        Self {
            base,
            pre_effect: None,
            post_effect: None,
        }
    }

    /// Attach an effect applied before the base transition. Only the state
    /// and action it returns feed the base stage.
    pub fn with_pre_effect(mut self, effect: Effect) -> Self {
        self.pre_effect = Some(effect);
        self
    }

    /// Attach an effect applied after the base transition. The state and
    /// reward it returns become the call's result.
    pub fn with_post_effect(mut self, effect: Effect) -> Self {
        self.post_effect = Some(effect);
        self
    }

    pub fn base(&self) -> &W {
        &self.base
    }

    /// Transition with an explicit previous-step reward threaded into the
    /// pre-effect stage. `None` threads a neutral 0.0.
    pub fn transition_from(
        &self,
        state: State,
        action: Action,
        prev_reward: Option<Reward>,
    ) -> Step {
        self.transition_traced(state, action, prev_reward).0
    }

    /// Like [`transition_from`](Self::transition_from), additionally
    /// returning the buffer captured between the pre- and post-effect
    /// stages (the pre-stage output triple).
    pub fn transition_traced(
        &self,
        state: State,
        action: Action,
        prev_reward: Option<Reward>,
    ) -> (Step, StepBuffer) {
        let prev = prev_reward.unwrap_or(0.0);
        let inputs = StepBuffer {
            state,
            action,
            reward: prev,
        };

        // Stage 1: pre-effect, identity if none.
        let (state1, action1, reward1) = match &self.pre_effect {
            Some(effect) => effect.apply(&self.base, state, action, prev, &inputs),
            None => (state, action, prev),
        };
        let buffer = StepBuffer {
            state: state1,
            action: action1,
            reward: reward1,
        };

        // Stage 2: base transition on the effective (state, action).
        let raw = self.base.transition(state1, action1);

        // Stage 3: post-effect over the stage-1 inputs and the raw reward.
        // With no post-effect the stage-2 result is adopted directly; the
        // base engine is pure, so recomputing it would change nothing.
        let step = match &self.post_effect {
            Some(effect) => {
                let (state2, _action2, reward2) =
                    effect.apply(&self.base, state1, action1, raw.reward, &buffer);
                Step {
                    state: state2,
                    reward: reward2,
                }
            }
            None => raw,
        };

        (step, buffer)
    }
}

impl<W: World> World for VariationalWorld<W> {
    fn transition(&self, state: State, action: Action) -> Step {
        self.transition_from(state, action, None)
    }
}
