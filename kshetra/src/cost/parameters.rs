//! Coverage oracle parameters (TOML).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KshetraError, Result};

fn default_world_map_size() -> usize {
    512
}

fn default_resolution() -> f64 {
    1.0
}

/// Parameters shared by every oracle built for a batch.
///
/// Key names follow the coverage environment's own parameter files; unknown
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageParameters {
    /// Expected robot count (unchecked when absent)
    #[serde(rename = "NumRobots", default)]
    pub num_robots: Option<usize>,

    /// World size in cells per side
    #[serde(rename = "pWorldMapSize", default = "default_world_map_size")]
    pub world_map_size: usize,

    /// Cell edge length in world units
    #[serde(rename = "pResolution", default = "default_resolution")]
    pub resolution: f64,
}

impl Default for CoverageParameters {
    fn default() -> Self {
        Self {
            num_robots: None,
            world_map_size: default_world_map_size(),
            resolution: default_resolution(),
        }
    }
}

impl CoverageParameters {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| {
            KshetraError::InvalidConfig(format!("coverage parameters: {}", e))
        })
    }

    /// World extent in world units.
    pub fn world_extent(&self) -> f64 {
        self.world_map_size as f64 * self.resolution
    }
}
