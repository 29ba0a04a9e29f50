//! Start-pose descriptor for re-initializing a simulation run.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::types::PoseSnapshot;
use crate::error::Result;

/// `<dir>/robot_poses_<bag>.sh`
pub fn pose_file_path(dir: &Path, bag_name: &str) -> PathBuf {
    dir.join(format!("robot_poses_{}.sh", bag_name))
}

/// Write one `<index> <x> <y> <heading>` line per robot.
pub fn write_pose_file(
    dir: &Path,
    bag_name: &str,
    snapshot: &PoseSnapshot,
    heading: f32,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = pose_file_path(dir, bag_name);
    let mut writer = BufWriter::new(File::create(&path)?);
    for (i, p) in snapshot.positions().iter().enumerate() {
        writeln!(writer, "{} {} {} {}", i, p.x, p.y, heading)?;
    }
    writer.flush()?;
    log::debug!("Wrote {} start poses to {}", snapshot.len(), path.display());
    Ok(path)
}
