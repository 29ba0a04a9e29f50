//! Output configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Where processed artifacts are written
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputSection {
    /// Directory receiving `<bag>/<bag>.processed`
    #[serde(default = "defaults::save_dir")]
    pub save_dir: String,

    /// Directory for `robot_poses_<bag>.sh` start-pose files
    /// (defaults to `<save_dir>/<bag>/`)
    #[serde(default)]
    pub pose_file_dir: Option<String>,

    /// Heading written for every robot in the start-pose file (radians)
    #[serde(default = "defaults::start_heading")]
    pub start_heading: f32,

    /// Also write `<bag>_cost.csv` next to the processed file
    #[serde(default = "defaults::enabled")]
    pub export_cost_csv: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            save_dir: defaults::save_dir(),
            pose_file_dir: None,
            start_heading: defaults::start_heading(),
            export_cost_csv: true,
        }
    }
}
