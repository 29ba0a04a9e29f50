//! Synthetic recordings for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use kshetra::TablesRecorder;
use kshetra::pipeline::extract::{
    CONTROL_NAMESPACE, CONTROL_TOPIC, GLOBAL_MAP_TOPIC, POSES_TOPIC, SIM_NAMESPACE,
    SYSTEM_MAP_TOPIC,
};
use kshetra::pipeline::tables_path;

/// Shape of a synthetic experiment.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Number of robots
    pub robots: usize,
    /// Pose samples at 1 Hz starting at `t = 0`
    pub pose_count: usize,
    /// Start-trigger channel per control sample (1 s apart)
    pub start: Vec<u8>,
    /// Stop-trigger channel per control sample
    pub stop: Vec<u8>,
    /// System map timestamps (seconds)
    pub map_times: Vec<f64>,
}

impl Scenario {
    /// Start rises at 2 s, stop at 4 s, poses at 0..=5 s.
    pub fn reference(robots: usize) -> Self {
        Self {
            robots,
            pose_count: 6,
            start: vec![0, 0, 1, 1, 1],
            stop: vec![0, 0, 0, 0, 1],
            map_times: vec![0.0, 1.9, 3.2, 4.1, 5.0],
        }
    }

    /// Position of `robot` at pose step `step`.
    pub fn position(&self, robot: usize, step: usize) -> (f64, f64) {
        (40.0 + 40.0 * step as f64, 64.0 + 96.0 * robot as f64)
    }

    /// Write this scenario as `<dir>/<name>/<name>.tables`.
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        fs::create_dir_all(dir.join(name)).unwrap();
        let path = tables_path(dir, name);
        let mut recorder = TablesRecorder::create(&path).unwrap();

        recorder
            .record_topic(
                CONTROL_NAMESPACE,
                CONTROL_TOPIC,
                self.start.iter().zip(&self.stop).enumerate().map(|(i, (&s, &e))| {
                    (i as f64 * 1e9, vec![0.0, 1.0, s as f64, e as f64])
                }),
            )
            .unwrap();

        recorder
            .record_topic(
                SIM_NAMESPACE,
                POSES_TOPIC,
                (0..self.pose_count).map(|i| {
                    let flat = (0..self.robots)
                        .flat_map(|r| {
                            let (x, y) = self.position(r, i);
                            [x, y, 0.0]
                        })
                        .collect();
                    (i as f64, flat)
                }),
            )
            .unwrap();

        recorder
            .record_topic(
                SIM_NAMESPACE,
                SYSTEM_MAP_TOPIC,
                self.map_times
                    .iter()
                    .map(|&t| (t, vec![0.0, 0.0, 0.5, 30.0, 30.0, 0.25])),
            )
            .unwrap();

        recorder
            .record_topic(
                SIM_NAMESPACE,
                GLOBAL_MAP_TOPIC,
                [(0.0, vec![8.0, 8.0, 1.0, 24.0, 24.0, 0.2])],
            )
            .unwrap();

        recorder.finish().unwrap();
        path
    }
}

/// Write oracle resources into `dir`, returning (params, idf) paths.
pub fn write_resources(dir: &Path, robots: usize) -> (PathBuf, PathBuf) {
    let params = dir.join("coverage_params.toml");
    let idf = dir.join("world.idf");
    fs::write(
        &params,
        format!("NumRobots = {}\npWorldMapSize = 64\npResolution = 4.0\n", robots),
    )
    .unwrap();
    fs::write(&idf, "# test world\ngaussian 128 128 48 1.0\n").unwrap();
    (params, idf)
}
