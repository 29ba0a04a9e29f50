//! Normalized cost replay.

use super::oracle::CoverageOracle;
use crate::core::types::PoseSnapshot;
use crate::error::{KshetraError, Result};

/// Replay `snapshots` through `oracle` and record cost relative to its
/// initial configuration.
///
/// The initial objective is read before any mutation and divides every step.
/// `cost[0]` is exactly `1.0`; step `i ≥ 1` sets `snapshots[i]` first.
pub fn replay_cost<O: CoverageOracle + ?Sized>(
    oracle: &mut O,
    snapshots: &[PoseSnapshot],
) -> Result<Vec<f64>> {
    if snapshots.is_empty() {
        return Err(KshetraError::empty("robot_poses"));
    }

    let initial = oracle.objective_value();
    if !initial.is_finite() || initial == 0.0 {
        return Err(KshetraError::DegenerateCost(initial));
    }

    let mut cost = Vec::with_capacity(snapshots.len());
    cost.push(1.0);
    for snapshot in &snapshots[1..] {
        oracle.set_positions(snapshot.positions());
        cost.push(oracle.objective_value() / initial);
    }
    Ok(cost)
}
