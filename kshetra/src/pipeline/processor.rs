//! Bag processor: window → align → match → densify → replay → assemble.

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::bag::ProcessedBag;
use super::extract::{
    POSES_TOPIC, SIM_NAMESPACE, SYSTEM_MAP_TOPIC, control_stream, global_map_samples,
    map_stream, pose_stream,
};
use crate::align::{gather, locate_window, match_streams};
use crate::config::KshetraConfig;
use crate::core::types::{DenseMap, rebase_to_zero};
use crate::cost::{OracleFactory, build_oracle, replay_cost, require_file};
use crate::error::{KshetraError, Result};
use crate::grid::{Interpolation, densify};
use crate::io::tables::LogTables;
use crate::io::{cost_csv_path, save_processed, write_cost_csv, write_pose_file};

/// Files the oracle is built from.
#[derive(Debug, Clone)]
pub struct OracleResources {
    /// Coverage parameters (TOML)
    pub params_path: PathBuf,
    /// Importance density function
    pub idf_path: PathBuf,
}

impl OracleResources {
    /// Parameters file and IDF file paths.
    pub fn new(params_path: impl Into<PathBuf>, idf_path: impl Into<PathBuf>) -> Self {
        Self {
            params_path: params_path.into(),
            idf_path: idf_path.into(),
        }
    }

    /// Fail with [`KshetraError::MissingResource`] for the first absent file.
    pub fn check(&self) -> Result<()> {
        require_file(&self.params_path)?;
        require_file(&self.idf_path)
    }
}

/// Turns extracted log tables into a [`ProcessedBag`].
///
/// One processor serves a whole batch; each call to [`process`] builds its
/// own oracle, so bags never share mutable state.
///
/// [`process`]: BagProcessor::process
pub struct BagProcessor<F: OracleFactory> {
    config: KshetraConfig,
    resources: OracleResources,
    factory: F,
    global_interp: Interpolation,
    system_interp: Interpolation,
}

impl<F: OracleFactory> BagProcessor<F> {
    /// Create a processor, rejecting unusable configuration up front.
    pub fn new(config: KshetraConfig, resources: OracleResources, factory: F) -> Result<Self> {
        config.validate()?;
        let global_interp = config.grid.global_interpolation()?;
        let system_interp = config.grid.system_interpolation()?;
        Ok(Self {
            config,
            resources,
            factory,
            global_interp,
            system_interp,
        })
    }

    /// Configuration this processor was built with.
    pub fn config(&self) -> &KshetraConfig {
        &self.config
    }

    /// Process one recording.
    ///
    /// Either returns a complete bag or fails without side effects.
    pub fn process(&self, bag_name: &str, tables: &LogTables) -> Result<ProcessedBag> {
        let started = Instant::now();
        self.resources.check()?;

        // Window
        let control = control_stream(tables)?;
        let window = locate_window(&control)?;
        log::info!(
            "[{}] Experiment window {:.2}s - {:.2}s ({:.2}s)",
            bag_name,
            window.start,
            window.stop,
            window.duration()
        );

        // Align both streams to the window
        let poses = pose_stream(tables, &self.config.poses)?;
        let system_samples = map_stream(tables, SYSTEM_MAP_TOPIC)?;

        let pose_range = poses
            .window_range(window.start, window.stop)
            .ok_or_else(|| KshetraError::empty(format!("{} poses in window", bag_name)))?;
        let map_range = system_samples
            .window_range(window.start, window.stop)
            .ok_or_else(|| KshetraError::empty(format!("{} system maps in window", bag_name)))?;
        let fine = poses.slice(pose_range);
        let coarse = system_samples.slice(map_range);
        log::debug!(
            "[{}] Sliced {} of {} poses, {} of {} system maps",
            bag_name,
            fine.len(),
            poses.len(),
            coarse.len(),
            system_samples.len()
        );

        // Match coarse steps to poses
        let indices = match_streams(fine.timestamps(), coarse.timestamps())?;
        let robot_poses = gather(fine.values(), &indices)?;

        // Densify
        let densify_config = self.config.densify_config();
        let global_map = densify(
            &global_map_samples(tables)?,
            &densify_config,
            self.global_interp,
        )?;
        let system_maps = coarse
            .values()
            .iter()
            .map(|samples| densify(samples, &densify_config, self.system_interp))
            .collect::<Result<Vec<DenseMap>>>()?;
        log::debug!(
            "[{}] Densified global map ({:.1}% known) and {} system maps",
            bag_name,
            global_map.known_fraction() * 100.0,
            system_maps.len()
        );

        // Cost replay from the first recorded pose
        let (_, initial) = poses
            .first()
            .ok_or_else(|| KshetraError::empty(format!("{}/{}", SIM_NAMESPACE, POSES_TOPIC)))?;
        let mut oracle = build_oracle(
            &self.factory,
            &self.resources.params_path,
            &self.resources.idf_path,
            initial,
        )?;
        let normalized_cost = replay_cost(&mut oracle, fine.values())?;

        // Zero-based time axes
        let (mut t_fine, _) = fine.into_parts();
        let (mut t_coarse, _) = coarse.into_parts();
        rebase_to_zero(&mut t_fine);
        rebase_to_zero(&mut t_coarse);

        let bag = ProcessedBag::new(
            bag_name,
            robot_poses,
            normalized_cost,
            global_map,
            system_maps,
            t_coarse,
            t_fine,
        )?;

        log::info!(
            "[{}] Processed {} poses, {} maps, final cost {:.3} in {:.2?}",
            bag_name,
            bag.t_fine().len(),
            bag.t_coarse().len(),
            bag.final_cost().unwrap_or(f64::NAN),
            started.elapsed()
        );
        Ok(bag)
    }

    /// Process one recording and persist it under `save_dir`.
    ///
    /// Writes the `.processed` file, the start-pose file and, if enabled,
    /// the cost CSV, in that order. Returns the path of the `.processed` file.
    pub fn process_and_save(
        &self,
        bag_name: &str,
        tables: &LogTables,
        save_dir: &Path,
    ) -> Result<PathBuf> {
        let bag = self.process(bag_name, tables)?;
        let path = save_processed(&bag, save_dir)?;
        self.write_start_poses(&bag, save_dir)?;
        if self.config.output.export_cost_csv {
            write_cost_csv(&bag, &cost_csv_path(save_dir, bag_name))?;
        }
        Ok(path)
    }

    /// Directory receiving `robot_poses_<bag>.sh`.
    ///
    /// `output.pose_file_dir` when set, otherwise the bag's own output
    /// directory `<save_dir>/<bag>/`.
    pub fn pose_file_dir(&self, bag_name: &str, save_dir: &Path) -> PathBuf {
        match &self.config.output.pose_file_dir {
            Some(dir) => PathBuf::from(dir),
            None => save_dir.join(bag_name),
        }
    }

    /// Write the first matched snapshot as the start-pose file.
    pub fn write_start_poses(&self, bag: &ProcessedBag, save_dir: &Path) -> Result<PathBuf> {
        let first = bag
            .robot_poses()
            .first()
            .ok_or_else(|| KshetraError::empty(format!("{} matched poses", bag.bag_name())))?;
        write_pose_file(
            &self.pose_file_dir(bag.bag_name(), save_dir),
            bag.bag_name(),
            first,
            self.config.output.start_heading,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputSection;
    use crate::core::types::TimeSeries;
    use crate::cost::mock::SumFactory;
    use crate::cost::OracleError;
    use crate::pipeline::extract::{CONTROL_NAMESPACE, CONTROL_TOPIC, GLOBAL_MAP_TOPIC};
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::TempDir;

    fn small_config() -> KshetraConfig {
        let mut config = KshetraConfig::default();
        config.grid.map_size = 8;
        config.grid.binning_factor = 2;
        config.poses.dimensions = 2;
        config.output = OutputSection::default();
        config
    }

    /// Start rises at 2 s, stop at 4 s; one robot moving along x at 1 Hz.
    fn scenario_tables() -> LogTables {
        let mut tables = LogTables::default();
        let start = [0.0, 0.0, 1.0, 1.0, 1.0];
        let stop = [0.0, 0.0, 0.0, 0.0, 1.0];
        tables.insert(
            CONTROL_NAMESPACE,
            CONTROL_TOPIC,
            TimeSeries::from_pairs(
                (0..5).map(|i| (i as f64 * 1e9, vec![0.0, 0.0, start[i], stop[i]])),
            ),
        );
        tables.insert(
            SIM_NAMESPACE,
            POSES_TOPIC,
            TimeSeries::from_pairs((0..6).map(|i| (i as f64, vec![10.0 * (i + 1) as f64, 5.0]))),
        );
        tables.insert(
            SIM_NAMESPACE,
            SYSTEM_MAP_TOPIC,
            TimeSeries::from_pairs(
                [0.0, 1.9, 3.2, 4.1, 5.0].map(|t| (t, vec![0.0, 0.0, 0.5, 6.0, 6.0, 1.0])),
            ),
        );
        tables.insert(
            SIM_NAMESPACE,
            GLOBAL_MAP_TOPIC,
            TimeSeries::from_pairs([(0.0, vec![2.0, 2.0, 0.8])]),
        );
        tables
    }

    fn resources(dir: &TempDir) -> OracleResources {
        let params = dir.path().join("params.toml");
        let idf = dir.path().join("world.idf");
        fs::write(&params, "NumRobots = 1\n").unwrap();
        fs::write(&idf, "gaussian 4 4 2 1\n").unwrap();
        OracleResources::new(params, idf)
    }

    fn processor(dir: &TempDir, config: KshetraConfig) -> BagProcessor<SumFactory> {
        BagProcessor::new(
            config,
            resources(dir),
            SumFactory {
                offset: 0.0,
                fail: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let dir = TempDir::new().unwrap();
        let bag = processor(&dir, small_config())
            .process("scenario", &scenario_tables())
            .unwrap();

        // Poses at 2, 3, 4 s survive the window
        assert_eq!(bag.t_fine(), &[0.0, 1.0, 2.0]);
        // Maps at 1.9, 3.2, 4.1 s
        assert_eq!(bag.t_coarse().len(), 3);
        assert_relative_eq!(bag.t_coarse()[1], 1.3, epsilon = 1e-12);
        assert_relative_eq!(bag.t_coarse()[2], 2.2, epsilon = 1e-12);

        // Matched poses: 1.9 -> 2 s, 3.2 -> 3 s, 4.1 -> 4 s
        let xs: Vec<f32> = bag.robot_poses().iter().map(|s| s.positions()[0].x).collect();
        assert_eq!(xs, vec![30.0, 40.0, 50.0]);

        // Oracle starts from the first unsliced pose (x = 10)
        assert_eq!(bag.normalized_cost(), &[1.0, 4.0, 5.0]);

        assert_eq!(bag.global_map().rows(), 8);
        assert_eq!(bag.system_maps().len(), 3);
        assert!(
            bag.system_maps()
                .iter()
                .flat_map(|m| m.cells())
                .all(|v| v.is_nan() || (0.0..=1.0).contains(v))
        );
    }

    #[test]
    fn test_nan_clamp_bound_rejected_up_front() {
        let dir = TempDir::new().unwrap();
        let mut config = small_config();
        config.poses.clamp_max = f32::NAN;
        let result = BagProcessor::new(
            config,
            resources(&dir),
            SumFactory {
                offset: 0.0,
                fail: None,
            },
        );
        assert!(matches!(result, Err(KshetraError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_idf_aborts_before_work() {
        let dir = TempDir::new().unwrap();
        let mut res = resources(&dir);
        res.idf_path = dir.path().join("absent.idf");
        let processor = BagProcessor::new(
            small_config(),
            res,
            SumFactory {
                offset: 0.0,
                fail: None,
            },
        )
        .unwrap();

        let err = processor.process("b", &LogTables::default()).unwrap_err();
        assert!(matches!(err, KshetraError::MissingResource(_)));
    }

    #[test]
    fn test_oracle_failure_writes_no_side_file() {
        let dir = TempDir::new().unwrap();
        let save_dir = dir.path().join("out");
        let processor = BagProcessor::new(
            small_config(),
            resources(&dir),
            SumFactory {
                offset: 0.0,
                fail: Some(OracleError::NoFeatures),
            },
        )
        .unwrap();

        let err = processor
            .process_and_save("b", &scenario_tables(), &save_dir)
            .unwrap_err();
        assert!(matches!(err, KshetraError::OracleConstruction(_)));
        assert!(!save_dir.join("b").join("robot_poses_b.sh").exists());
    }

    #[test]
    fn test_process_alone_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let pose_dir = dir.path().join("poses");
        let mut config = small_config();
        config.output.pose_file_dir = Some(pose_dir.to_string_lossy().into_owned());

        processor(&dir, config)
            .process("b", &scenario_tables())
            .unwrap();
        assert!(!pose_dir.exists());
    }

    #[test]
    fn test_side_file_uses_matched_snapshot() {
        let dir = TempDir::new().unwrap();
        let pose_dir = dir.path().join("poses");
        let mut config = small_config();
        config.output.pose_file_dir = Some(pose_dir.to_string_lossy().into_owned());

        processor(&dir, config)
            .process_and_save("b", &scenario_tables(), &dir.path().join("out"))
            .unwrap();
        let text = fs::read_to_string(pose_dir.join("robot_poses_b.sh")).unwrap();
        assert_eq!(text, "0 30 5 1.5708\n");
    }

    #[test]
    fn test_side_file_defaults_to_bag_dir() {
        let dir = TempDir::new().unwrap();
        let save_dir = dir.path().join("out");
        let config = small_config();
        assert!(config.output.pose_file_dir.is_none());

        processor(&dir, config)
            .process_and_save("b", &scenario_tables(), &save_dir)
            .unwrap();
        let text = fs::read_to_string(save_dir.join("b").join("robot_poses_b.sh")).unwrap();
        assert_eq!(text, "0 30 5 1.5708\n");
    }

    #[test]
    fn test_failed_save_writes_no_side_file() {
        let dir = TempDir::new().unwrap();
        let pose_dir = dir.path().join("poses");
        let mut config = small_config();
        config.output.pose_file_dir = Some(pose_dir.to_string_lossy().into_owned());

        // A plain file where the output directory should be
        let save_dir = dir.path().join("blocked");
        fs::write(&save_dir, "").unwrap();

        let err = processor(&dir, config)
            .process_and_save("b", &scenario_tables(), &save_dir)
            .unwrap_err();
        assert!(matches!(err, KshetraError::Io(_)));
        assert!(!pose_dir.join("robot_poses_b.sh").exists());
    }

    #[test]
    fn test_process_and_save() {
        let dir = TempDir::new().unwrap();
        let save_dir = dir.path().join("out");
        let path = processor(&dir, small_config())
            .process_and_save("b", &scenario_tables(), &save_dir)
            .unwrap();

        assert!(path.exists());
        assert!(save_dir.join("b").join("b_cost.csv").exists());
    }

    /// Full 4x4 binned grid: columns 0-1 empty, columns 2-3 occupied.
    fn step_samples() -> Vec<f64> {
        let mut flat = Vec::new();
        for y in (0..8).step_by(2) {
            for x in (0..8).step_by(2) {
                let value = if x >= 4 { 1.0 } else { 0.0 };
                flat.extend([x as f64, y as f64, value]);
            }
        }
        flat
    }

    #[test]
    fn test_global_map_cubic_system_maps_linear() {
        let dir = TempDir::new().unwrap();
        let mut tables = scenario_tables();
        tables.insert(
            SIM_NAMESPACE,
            GLOBAL_MAP_TOPIC,
            TimeSeries::from_pairs([(0.0, step_samples())]),
        );
        tables.insert(
            SIM_NAMESPACE,
            SYSTEM_MAP_TOPIC,
            TimeSeries::from_pairs([0.0, 1.9, 3.2, 4.1, 5.0].map(|t| (t, step_samples()))),
        );

        let bag = processor(&dir, small_config())
            .process("b", &tables)
            .unwrap();

        // Output column 3 samples binned x = 1.25 across the 0 -> 1 step
        assert_relative_eq!(bag.global_map().get(3, 3).unwrap(), 0.203125, epsilon = 1e-4);
        for map in bag.system_maps() {
            assert_relative_eq!(map.get(3, 3).unwrap(), 0.25, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_missing_system_maps() {
        let dir = TempDir::new().unwrap();
        let mut tables = scenario_tables();
        tables.insert(SIM_NAMESPACE, SYSTEM_MAP_TOPIC, TimeSeries::default());
        let err = processor(&dir, small_config())
            .process("b", &tables)
            .unwrap_err();
        assert!(matches!(err, KshetraError::EmptyStream(_)));
    }
}
