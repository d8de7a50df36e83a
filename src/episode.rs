// src/episode.rs
//
// Policy-driven episode rollout.
//
// A policy picks one action per state; rollout repeatedly queries the
// transition oracle until the terminal state is reached, recording the
// post-transition (state, action, reward) sequence. A policy that revisits
// a state within the rollout can never terminate and is reported as a hard
// failure instead of looping forever.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Action, Reward, State, World};

/// Decision-making interface for rollouts.
///
/// `&mut self` so stateful policies (seeded RNGs, learned policies with
/// internal caches) fit the same interface as pure lookup tables.
pub trait Policy {
    fn action(&mut self, state: State) -> Action;
}

/// Adapter turning any `FnMut(State) -> Action` closure into a policy.
pub struct FnPolicy<F>(pub F);

impl<F: FnMut(State) -> Action> Policy for FnPolicy<F> {
    fn action(&mut self, state: State) -> Action {
        (self.0)(state)
    }
}

/// Uniform random policy with a deterministic, seeded RNG.
///
/// Two policies built from the same seed produce the same action sequence,
/// so random rollouts are reproducible.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn action(&mut self, _state: State) -> Action {
        Action::ALL[self.rng.gen_range(0..Action::ALL.len())]
    }
}

/// The recorded outcome of one rollout: the post-transition state, the
/// action taken, and the reward received, per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub states: Vec<State>,
    pub actions: Vec<Action>,
    pub rewards: Vec<Reward>,
}

impl Episode {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn total_reward(&self) -> Reward {
        self.rewards.iter().sum()
    }
}

/// Errors that can occur during a rollout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeError {
    /// The policy revisited a state within this rollout before reaching the
    /// terminal state, so the rollout can never terminate.
    CyclicPolicy { state: State },
}

impl fmt::Display for EpisodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpisodeError::CyclicPolicy { state } => {
                write!(f, "cyclic policy revisits state {}, cannot terminate", state)
            }
        }
    }
}

impl std::error::Error for EpisodeError {}

/// Roll out `policy` on `world` from `start` until `terminal` is entered.
///
/// The cycle check inspects only the states recorded so far in this rollout,
/// not any global history. Starting at the terminal state yields an empty
/// episode.
pub fn rollout(
    world: &dyn World,
    start: State,
    terminal: State,
    policy: &mut dyn Policy,
) -> Result<Episode, EpisodeError> {
    let mut episode = Episode::default();
    let mut current = start;

    while current != terminal {
        let action = policy.action(current);
        let step = world.transition(current, action);

        if episode.states.contains(&step.state) {
            return Err(EpisodeError::CyclicPolicy { state: step.state });
        }

        episode.states.push(step.state);
        episode.actions.push(action);
        episode.rewards.push(step.reward);
        current = step.state;
    }

    Ok(episode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::world::GridWorld;

    fn three_by_two() -> GridWorld {
        let mut config = GridConfig::new(3, 2);
        config.rewards = [(2, -3.0), (4, -2.0), (5, -2.0)].into_iter().collect();
        config.default_reward = -1.0;
        GridWorld::new(&config)
    }

    #[test]
    fn rollout_records_the_post_transition_sequence() {
        let world = three_by_two();
        // Walk 0 -> 2 -> 4 down the first column, then right into 5.
        let mut policy = FnPolicy(|state: State| match state {
            4 => Action::Right,
            _ => Action::Down,
        });

        let episode = rollout(&world, 0, 5, &mut policy).unwrap();
        assert_eq!(episode.states, vec![2, 4, 5]);
        assert_eq!(episode.actions, vec![Action::Down, Action::Down, Action::Right]);
        assert_eq!(episode.rewards, vec![-3.0, -2.0, -2.0]);
        assert_eq!(episode.total_reward(), -7.0);
    }

    #[test]
    fn starting_at_the_terminal_state_yields_an_empty_episode() {
        let world = three_by_two();
        let mut policy = FnPolicy(|_: State| Action::Down);

        let episode = rollout(&world, 5, 5, &mut policy).unwrap();
        assert!(episode.is_empty());
    }

    #[test]
    fn cyclic_policy_is_a_hard_failure() {
        let world = three_by_two();
        // Bounce between 0 and 2 forever.
        let mut policy = FnPolicy(|state: State| if state == 0 { Action::Down } else { Action::Up });

        let err = rollout(&world, 0, 5, &mut policy).unwrap_err();
        assert_eq!(err, EpisodeError::CyclicPolicy { state: 2 });
        assert!(err.to_string().contains("cyclic policy"));
    }

    #[test]
    fn no_op_transitions_trip_the_cycle_check() {
        let world = three_by_two();
        // Pushing left from the first column goes nowhere; the second no-op
        // revisits the recorded state.
        let mut policy = FnPolicy(|_: State| Action::Left);

        let err = rollout(&world, 1, 5, &mut policy).unwrap_err();
        assert_eq!(err, EpisodeError::CyclicPolicy { state: 0 });
    }

    #[test]
    fn random_policy_is_deterministic_per_seed() {
        let mut a = RandomPolicy::seeded(42);
        let mut b = RandomPolicy::seeded(42);
        let actions_a: Vec<Action> = (0..32).map(|_| a.action(0)).collect();
        let actions_b: Vec<Action> = (0..32).map(|_| b.action(0)).collect();
        assert_eq!(actions_a, actions_b);
    }
}
