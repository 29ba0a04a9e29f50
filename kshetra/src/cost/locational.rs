//! Reference oracle: Lloyd locational cost over a discretized world.

use std::path::Path;

use super::idf::WorldIdf;
use super::oracle::{CoverageOracle, OracleError, OracleFactory};
use super::parameters::CoverageParameters;
use crate::core::types::{Point2D, PoseSnapshot};

/// Locational cost `Σ φ(q) · min_i ‖q − p_i‖² · A` over world cells `q`.
///
/// Density `φ` is sampled once at cell centers on construction.
#[derive(Debug, Clone)]
pub struct LocationalCostOracle {
    size: usize,
    resolution: f64,
    density: Vec<f64>,
    positions: Vec<Point2D>,
}

impl LocationalCostOracle {
    /// Sample the IDF over the world grid and take `initial` as the
    /// current configuration.
    pub fn new(
        params: &CoverageParameters,
        idf: &WorldIdf,
        initial: &PoseSnapshot,
    ) -> Result<Self, OracleError> {
        if params.world_map_size == 0 {
            return Err(OracleError::InvalidWorld("world map size is zero".to_string()));
        }
        if !(params.resolution.is_finite() && params.resolution > 0.0) {
            return Err(OracleError::InvalidWorld(format!(
                "resolution must be positive (got {})",
                params.resolution
            )));
        }
        if let Some(expected) = params.num_robots
            && expected != initial.len()
        {
            return Err(OracleError::RobotCount {
                expected,
                actual: initial.len(),
            });
        }
        if initial.is_empty() {
            return Err(OracleError::RobotCount {
                expected: params.num_robots.unwrap_or(1),
                actual: 0,
            });
        }

        let size = params.world_map_size;
        let res = params.resolution;
        let mut density = Vec::with_capacity(size * size);
        for row in 0..size {
            let qy = (row as f64 + 0.5) * res;
            for col in 0..size {
                let qx = (col as f64 + 0.5) * res;
                density.push(idf.density(qx, qy));
            }
        }
        log::debug!(
            "Sampled {} IDF features on a {}x{} world ({} units per side)",
            idf.features().len(),
            size,
            size,
            params.world_extent()
        );

        Ok(Self {
            size,
            resolution: res,
            density,
            positions: initial.positions().to_vec(),
        })
    }

    /// Robots in the current configuration.
    pub fn num_robots(&self) -> usize {
        self.positions.len()
    }
}

impl CoverageOracle for LocationalCostOracle {
    fn set_positions(&mut self, positions: &[Point2D]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
    }

    fn objective_value(&mut self) -> f64 {
        if self.positions.is_empty() {
            return f64::INFINITY;
        }
        let res = self.resolution;
        let mut total = 0.0;
        for row in 0..self.size {
            let qy = (row as f64 + 0.5) * res;
            let weights = &self.density[row * self.size..(row + 1) * self.size];
            for (col, &phi) in weights.iter().enumerate() {
                if phi == 0.0 {
                    continue;
                }
                let qx = (col as f64 + 0.5) * res;
                let d2 = self
                    .positions
                    .iter()
                    .map(|p| {
                        let dx = qx - p.x as f64;
                        let dy = qy - p.y as f64;
                        dx * dx + dy * dy
                    })
                    .fold(f64::INFINITY, f64::min);
                total += phi * d2;
            }
        }
        total * res * res
    }
}

/// Builds a [`LocationalCostOracle`] from an IDF file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationalCostFactory;

impl OracleFactory for LocationalCostFactory {
    type Oracle = LocationalCostOracle;

    fn name(&self) -> &str {
        "locational"
    }

    fn build(
        &self,
        params: &CoverageParameters,
        idf_path: &Path,
        initial: &PoseSnapshot,
    ) -> Result<LocationalCostOracle, OracleError> {
        let idf = WorldIdf::load(idf_path)?;
        LocationalCostOracle::new(params, &idf, initial)
    }
}
