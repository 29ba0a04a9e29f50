//! Grid configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::error::{KshetraError, Result};
use crate::grid::{DensifyConfig, Interpolation};

/// Density map geometry and interpolation settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Full-resolution map size in cells per side
    #[serde(default = "defaults::map_size")]
    pub map_size: usize,

    /// Ratio between the full grid and the binned grid stored in logs
    #[serde(default = "defaults::binning_factor")]
    pub binning_factor: usize,

    /// Interpolation order for the global map (0, 1 or 3)
    #[serde(default = "defaults::global_order")]
    pub global_order: u8,

    /// Interpolation order for per-timestep system maps (0, 1 or 3)
    #[serde(default = "defaults::system_order")]
    pub system_order: u8,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            map_size: defaults::map_size(),
            binning_factor: defaults::binning_factor(),
            global_order: defaults::global_order(),
            system_order: defaults::system_order(),
        }
    }
}

impl GridSection {
    /// Convert to the densifier geometry.
    pub fn to_densify_config(&self) -> DensifyConfig {
        DensifyConfig {
            map_size: self.map_size,
            binning_factor: self.binning_factor,
        }
    }

    /// Kernel used for the global map.
    pub fn global_interpolation(&self) -> Result<Interpolation> {
        interpolation(self.global_order, "global_order")
    }

    /// Kernel used for system maps.
    pub fn system_interpolation(&self) -> Result<Interpolation> {
        interpolation(self.system_order, "system_order")
    }
}

fn interpolation(order: u8, field: &str) -> Result<Interpolation> {
    Interpolation::from_order(order).ok_or_else(|| {
        KshetraError::InvalidConfig(format!(
            "grid.{} must be 0, 1 or 3 (got {})",
            field, order
        ))
    })
}
