//! Main KshetraConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::output::OutputSection;
use super::poses::PoseSection;
use crate::error::{KshetraError, Result};
use crate::grid::DensifyConfig;

/// Default config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Full Kshetra configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct KshetraConfig {
    /// Map geometry and interpolation
    #[serde(default)]
    pub grid: GridSection,

    /// Pose decoding
    #[serde(default)]
    pub poses: PoseSection,

    /// Output locations
    #[serde(default)]
    pub output: OutputSection,
}

impl KshetraConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> std::result::Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Densifier geometry
    pub fn densify_config(&self) -> DensifyConfig {
        self.grid.to_densify_config()
    }

    /// Reject combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.densify_config().validate()?;
        self.grid.global_interpolation()?;
        self.grid.system_interpolation()?;
        if self.poses.dimensions < 2 {
            return Err(KshetraError::InvalidConfig(format!(
                "poses.dimensions must be at least 2 (got {})",
                self.poses.dimensions
            )));
        }
        if !(self.poses.clamp_min.is_finite() && self.poses.clamp_max.is_finite()) {
            return Err(KshetraError::InvalidConfig(format!(
                "poses clamp bounds must be finite (got {} and {})",
                self.poses.clamp_min, self.poses.clamp_max
            )));
        }
        if self.poses.clamp_min > self.poses.clamp_max {
            return Err(KshetraError::InvalidConfig(format!(
                "poses.clamp_min {} exceeds clamp_max {}",
                self.poses.clamp_min, self.poses.clamp_max
            )));
        }
        Ok(())
    }
}
