//! The pipeline's terminal artifact.

use serde::{Deserialize, Serialize};

use crate::align::nearest_index;
use crate::core::types::{DenseMap, PoseSnapshot};
use crate::error::{KshetraError, Result};

/// One processed recording, aligned to a common zero-based time axis.
///
/// Coarse series (`robot_poses`, `system_maps`, `t_coarse`) share one length;
/// fine series (`normalized_cost`, `t_fine`) share another. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedBag {
    bag_name: String,
    robot_poses: Vec<PoseSnapshot>,
    normalized_cost: Vec<f64>,
    global_map: DenseMap,
    system_maps: Vec<DenseMap>,
    t_coarse: Vec<f64>,
    t_fine: Vec<f64>,
}

impl ProcessedBag {
    /// Assemble a bag, checking that parallel series agree in length.
    pub fn new(
        bag_name: impl Into<String>,
        robot_poses: Vec<PoseSnapshot>,
        normalized_cost: Vec<f64>,
        global_map: DenseMap,
        system_maps: Vec<DenseMap>,
        t_coarse: Vec<f64>,
        t_fine: Vec<f64>,
    ) -> Result<Self> {
        if robot_poses.len() != t_coarse.len() || system_maps.len() != t_coarse.len() {
            return Err(KshetraError::malformed(format!(
                "coarse series disagree: {} poses, {} maps, {} timestamps",
                robot_poses.len(),
                system_maps.len(),
                t_coarse.len()
            )));
        }
        if normalized_cost.len() != t_fine.len() {
            return Err(KshetraError::malformed(format!(
                "fine series disagree: {} costs, {} timestamps",
                normalized_cost.len(),
                t_fine.len()
            )));
        }

        Ok(Self {
            bag_name: bag_name.into(),
            robot_poses,
            normalized_cost,
            global_map,
            system_maps,
            t_coarse,
            t_fine,
        })
    }

    /// Recording name.
    pub fn bag_name(&self) -> &str {
        &self.bag_name
    }

    /// Matched pose snapshot per coarse step.
    pub fn robot_poses(&self) -> &[PoseSnapshot] {
        &self.robot_poses
    }

    /// Cost per fine step, relative to the initial configuration.
    pub fn normalized_cost(&self) -> &[f64] {
        &self.normalized_cost
    }

    /// Time-invariant global density map.
    pub fn global_map(&self) -> &DenseMap {
        &self.global_map
    }

    /// Dense system map per coarse step.
    pub fn system_maps(&self) -> &[DenseMap] {
        &self.system_maps
    }

    /// Coarse timestamps in seconds, starting at zero.
    pub fn t_coarse(&self) -> &[f64] {
        &self.t_coarse
    }

    /// Fine timestamps in seconds, starting at zero.
    pub fn t_fine(&self) -> &[f64] {
        &self.t_fine
    }

    /// Coarse step nearest to `t` seconds.
    pub fn coarse_index_at(&self, t: f64) -> Option<usize> {
        nearest_index(&self.t_coarse, t)
    }

    /// Length of the fine time axis in seconds.
    pub fn duration(&self) -> f64 {
        self.t_fine.last().copied().unwrap_or(0.0)
    }

    /// Robots per snapshot (0 for an empty bag).
    pub fn num_robots(&self) -> usize {
        self.robot_poses.first().map_or(0, PoseSnapshot::len)
    }

    /// Cost at the last fine step.
    pub fn final_cost(&self) -> Option<f64> {
        self.normalized_cost.last().copied()
    }
}
