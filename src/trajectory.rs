// src/trajectory.rs
//
// Trajectory export for downstream tooling.
//
// The core performs no rendering; visualization and analysis collaborators
// consume trajectories as plain data. This module flattens an episode into
// per-step records and writes them as JSON Lines next to a versioned
// metadata file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::episode::Episode;
use crate::types::{Action, Reward, State};

/// Current trajectory format version.
/// Increment when changing the record schema.
pub const TRAJECTORY_VERSION: u32 = 1;

/// A single recorded transition within an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    /// Zero-based step index within the episode.
    pub step: u64,
    /// State entered by this transition.
    pub state: State,
    /// Action taken.
    pub action: Action,
    /// Reward received for entering `state`.
    pub reward: Reward,
}

/// Metadata describing one exported trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryMetadata {
    pub trajectory_version: u32,
    /// Grid geometry the trajectory was collected on.
    pub rows: usize,
    pub cols: usize,
    pub start_state: State,
    pub terminal_state: State,
    pub num_transitions: u64,
    pub total_reward: Reward,
}

/// Flatten an episode into per-step records.
pub fn records_from_episode(episode: &Episode) -> Vec<TrajectoryRecord> {
    episode
        .states
        .iter()
        .zip(&episode.actions)
        .zip(&episode.rewards)
        .enumerate()
        .map(|(step, ((&state, &action), &reward))| TrajectoryRecord {
            step: step as u64,
            state,
            action,
            reward,
        })
        .collect()
}

/// Writes trajectory data to files.
pub struct TrajectoryWriter {
    output_dir: String,
}

impl TrajectoryWriter {
    /// Create a new writer with the given output directory.
    pub fn new(output_dir: &str) -> Self {
        Self {
            output_dir: output_dir.to_string(),
        }
    }

    /// Write records and metadata to files.
    ///
    /// Creates:
    /// - {output_dir}/trajectory.jsonl - one JSON record per line
    /// - {output_dir}/metadata.json - JSON metadata
    pub fn write(
        &self,
        records: &[TrajectoryRecord],
        metadata: &TrajectoryMetadata,
    ) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir)?;

        let metadata_json = serde_json::to_string_pretty(metadata)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(Path::new(&self.output_dir).join("metadata.json"), metadata_json)?;

        let mut file = fs::File::create(Path::new(&self.output_dir).join("trajectory.jsonl"))?;
        for record in records {
            let line = serde_json::to_string(record)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(file, "{}", line)?;
        }

        Ok(())
    }
}
