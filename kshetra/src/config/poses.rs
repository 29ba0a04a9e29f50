//! Pose ingestion section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// How flattened pose arrays are decoded
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoseSection {
    /// Values per robot in the flattened array (2 = xy, 3 = xyz)
    #[serde(default = "defaults::pose_dimensions")]
    pub dimensions: usize,

    /// Lower clamp bound applied to both coordinates
    #[serde(default = "defaults::clamp_min")]
    pub clamp_min: f32,

    /// Upper clamp bound applied to both coordinates
    #[serde(default = "defaults::clamp_max")]
    pub clamp_max: f32,
}

impl Default for PoseSection {
    fn default() -> Self {
        Self {
            dimensions: defaults::pose_dimensions(),
            clamp_min: defaults::clamp_min(),
            clamp_max: defaults::clamp_max(),
        }
    }
}
