//! Sparse binned samples to dense full-resolution maps.

use serde::{Deserialize, Serialize};

use super::resample::{Interpolation, zoom};
use crate::core::types::{BinnedSample, DenseMap};
use crate::error::{KshetraError, Result};

/// Geometry shared by every map of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensifyConfig {
    /// Full-resolution grid size (cells per side)
    pub map_size: usize,
    /// Downsampling ratio between the full grid and the stored grid
    pub binning_factor: usize,
}

impl Default for DensifyConfig {
    fn default() -> Self {
        Self {
            map_size: 512,
            binning_factor: 2,
        }
    }
}

impl DensifyConfig {
    /// Side length of the binned grid.
    pub fn binned_size(&self) -> usize {
        self.map_size / self.binning_factor
    }

    /// Check that the binned grid tiles the full grid exactly.
    pub fn validate(&self) -> Result<()> {
        if self.binning_factor == 0 {
            return Err(KshetraError::InvalidConfig(
                "binning_factor must be at least 1".to_string(),
            ));
        }
        if self.map_size == 0 || self.map_size % self.binning_factor != 0 {
            return Err(KshetraError::InvalidConfig(format!(
                "map_size {} is not a positive multiple of binning_factor {}",
                self.map_size, self.binning_factor
            )));
        }
        Ok(())
    }
}

/// Scatter samples into the binned grid.
///
/// Cell `[y / b][x / b]` takes the sample value; a later sample landing on
/// the same cell overwrites the earlier one. Returns the grid and the number
/// of samples that fell outside it.
fn scatter(samples: &[BinnedSample], config: &DensifyConfig) -> (DenseMap, usize) {
    let size = config.binned_size();
    let b = config.binning_factor as i64;
    let mut grid = DenseMap::unknown(size, size);
    let mut outside = 0usize;

    for s in samples {
        if s.cell_x < 0 || s.cell_y < 0 {
            outside += 1;
            continue;
        }
        let col = (s.cell_x / b) as usize;
        let row = (s.cell_y / b) as usize;
        if !grid.set(row, col, s.value) {
            outside += 1;
        }
    }
    (grid, outside)
}

/// Reconstruct a full-resolution map from binned samples.
///
/// Unlisted cells start as unknown (`NaN`), the binned grid is upsampled by
/// the binning factor with `interp`, and the result is clipped to `[0, 1]`.
pub fn densify(
    samples: &[BinnedSample],
    config: &DensifyConfig,
    interp: Interpolation,
) -> Result<DenseMap> {
    config.validate()?;

    let (binned, outside) = scatter(samples, config);
    if outside > 0 {
        log::warn!(
            "Skipped {} of {} map samples outside the {}x{} binned grid",
            outside,
            samples.len(),
            config.binned_size(),
            config.binned_size()
        );
    }

    let mut dense = zoom(&binned, config.binning_factor, interp);
    dense.clip(0.0, 1.0);
    Ok(dense)
}
