//! Typed streams from extracted log tables.

use crate::config::PoseSection;
use crate::core::types::{BinnedSample, MissionControlRecord, PoseSnapshot, TimeSeries};
use crate::error::{KshetraError, Result};
use crate::io::tables::LogTables;

/// Simulator namespace
pub const SIM_NAMESPACE: &str = "sim";
/// Flattened positions of every robot
pub const POSES_TOPIC: &str = "all_robot_positions";
/// Time-invariant importance map
pub const GLOBAL_MAP_TOPIC: &str = "global_map";
/// Per-step coverage map
pub const SYSTEM_MAP_TOPIC: &str = "system_map";
/// Mission-control namespace
pub const CONTROL_NAMESPACE: &str = "mission_control";
/// Start/stop trigger channels
pub const CONTROL_TOPIC: &str = "mission_control";

/// Mission-control channels, timestamps in nanoseconds.
pub fn control_stream(tables: &LogTables) -> Result<TimeSeries<MissionControlRecord>> {
    let raw = tables.topic(CONTROL_NAMESPACE, CONTROL_TOPIC)?;
    Ok(raw.clone().map(|v| MissionControlRecord::from_raw(&v)))
}

/// Pose snapshots, clamped into the configured range.
///
/// Every snapshot must hold the same number of robots.
pub fn pose_stream(tables: &LogTables, poses: &PoseSection) -> Result<TimeSeries<PoseSnapshot>> {
    let raw = tables.topic(SIM_NAMESPACE, POSES_TOPIC)?;
    if raw.is_empty() {
        return Err(KshetraError::empty(format!("{}/{}", SIM_NAMESPACE, POSES_TOPIC)));
    }

    let mut robots: Option<usize> = None;
    raw.clone().try_map(|values| {
        let snapshot = PoseSnapshot::from_flat(&values, poses.dimensions).ok_or_else(|| {
            KshetraError::malformed(format!(
                "pose array of length {} is not a multiple of {}",
                values.len(),
                poses.dimensions
            ))
        })?;
        match robots {
            None => robots = Some(snapshot.len()),
            Some(n) if n != snapshot.len() => {
                return Err(KshetraError::malformed(format!(
                    "robot count changed from {} to {}",
                    n,
                    snapshot.len()
                )));
            }
            Some(_) => {}
        }
        Ok(snapshot.clamped(poses.clamp_min, poses.clamp_max))
    })
}

/// Binned samples per timestamp on a map topic.
pub fn map_stream(tables: &LogTables, topic: &str) -> Result<TimeSeries<Vec<BinnedSample>>> {
    let raw = tables.topic(SIM_NAMESPACE, topic)?;
    if raw.is_empty() {
        return Err(KshetraError::empty(format!("{}/{}", SIM_NAMESPACE, topic)));
    }
    raw.clone().try_map(|values| {
        BinnedSample::decode_triples(&values).ok_or_else(|| {
            KshetraError::malformed(format!(
                "{} record of length {} is not (x, y, value) triples",
                topic,
                values.len()
            ))
        })
    })
}

/// The time-invariant global map: the earliest sample on its topic.
pub fn global_map_samples(tables: &LogTables) -> Result<Vec<BinnedSample>> {
    let stream = map_stream(tables, GLOBAL_MAP_TOPIC)?;
    let (_, values) = stream.into_parts();
    if values.len() > 1 {
        log::debug!("Using first of {} global map samples", values.len());
    }
    values
        .into_iter()
        .next()
        .ok_or_else(|| KshetraError::empty(format!("{}/{}", SIM_NAMESPACE, GLOBAL_MAP_TOPIC)))
}
