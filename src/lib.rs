//! Deterministic 2D grid-world transition oracle for classic RL experiments.
//!
//! The crate models a finite grid environment as a pure state-transition
//! oracle: given a state and an action it returns the resulting state and an
//! associated reward. Variants of the environment (teleport tiles, forbidden
//! tiles, edge penalties) are expressed as composable effects around the base
//! engine rather than as modifications to it.
//!
//! # Architecture
//!
//! - **Base engine** (`world`): [`GridWorld`] precomputes dense transition
//!   and reward tables from grid geometry at construction and answers every
//!   query by table lookup. Pure and immutable after construction.
//!
//! - **Effects** (`effects`): a closed set of transforms over a
//!   (state, action, reward) triple — [`JumpEffect`], [`BlockEffect`],
//!   [`EdgeEffect`] — each computing a raw transition from a supplied source
//!   world and then adjusting it.
//!
//! - **Variational world** (`variational`): [`VariationalWorld`] surrounds
//!   one base transition with an optional pre-effect and an optional
//!   post-effect, exposing the same contract as the base engine through the
//!   [`World`] trait so variants nest and substitute transparently.
//!
//! - **Rollout** (`episode`): [`Policy`]-driven episode collection with
//!   cyclic-policy detection.
//!
//! - **Trajectory export** (`trajectory`): per-step JSONL records plus
//!   versioned metadata for visualization and analysis collaborators.
//!
//! Everything is synchronous and deterministic; worlds are immutable after
//! construction and safe to share across threads.

pub mod config;
pub mod effects;
pub mod episode;
pub mod trajectory;
pub mod types;
pub mod variational;
pub mod world;

// --- Re-exports for ergonomic external use ---------------------------------

pub use config::GridConfig;
pub use effects::{BlockEffect, EdgeEffect, Effect, JumpEffect, Penalty};
pub use episode::{rollout, Episode, EpisodeError, FnPolicy, Policy, RandomPolicy};
pub use trajectory::{
    records_from_episode, TrajectoryMetadata, TrajectoryRecord, TrajectoryWriter,
    TRAJECTORY_VERSION,
};
pub use types::{Action, Reward, State, Step, StepBuffer, World};
pub use variational::VariationalWorld;
pub use world::GridWorld;
