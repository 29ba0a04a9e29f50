//! Coverage oracle capability and fallible construction.

use std::path::Path;

use thiserror::Error;

use super::parameters::CoverageParameters;
use crate::core::types::{Point2D, PoseSnapshot};
use crate::error::{KshetraError, Result};

/// Reasons an oracle cannot be built from inputs that exist on disk.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    /// Environment density file could not be read
    #[error("cannot read IDF file: {0}")]
    Io(String),
    /// A line of the IDF file does not parse
    #[error("IDF line {line}: {reason}")]
    MalformedIdf {
        /// 1-based line number
        line: usize,
        /// What failed to parse
        reason: String,
    },
    /// The IDF file defines no density features
    #[error("IDF file defines no features")]
    NoFeatures,
    /// Initial snapshot disagrees with the configured robot count
    #[error("expected {expected} robots, initial snapshot has {actual}")]
    RobotCount {
        /// `NumRobots` from the parameters file
        expected: usize,
        /// Robots in the initial snapshot
        actual: usize,
    },
    /// World geometry cannot be evaluated
    #[error("invalid world: {0}")]
    InvalidWorld(String),
}

/// Stateful coverage evaluator.
///
/// Holds the current robot configuration; [`set_positions`] replaces it and
/// [`objective_value`] scores it. Lower is better coverage.
///
/// [`set_positions`]: CoverageOracle::set_positions
/// [`objective_value`]: CoverageOracle::objective_value
pub trait CoverageOracle {
    /// Replace the current robot positions.
    fn set_positions(&mut self, positions: &[Point2D]);

    /// Objective value of the current configuration.
    fn objective_value(&mut self) -> f64;
}

impl<O: CoverageOracle + ?Sized> CoverageOracle for Box<O> {
    fn set_positions(&mut self, positions: &[Point2D]) {
        (**self).set_positions(positions)
    }

    fn objective_value(&mut self) -> f64 {
        (**self).objective_value()
    }
}

/// Builds one oracle per processed bag.
pub trait OracleFactory {
    /// Oracle produced by [`build`](OracleFactory::build)
    type Oracle: CoverageOracle;

    /// Name of this oracle for logging.
    fn name(&self) -> &str;

    /// Build an oracle whose initial configuration is `initial`.
    fn build(
        &self,
        params: &CoverageParameters,
        idf_path: &Path,
        initial: &PoseSnapshot,
    ) -> std::result::Result<Self::Oracle, OracleError>;
}

/// Fail with [`KshetraError::MissingResource`] unless `path` is a file.
pub fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(KshetraError::MissingResource(path.to_path_buf()))
    }
}

/// Build an oracle from resource files.
///
/// Missing files are reported before construction is attempted, so
/// [`KshetraError::MissingResource`] and [`KshetraError::OracleConstruction`]
/// stay distinguishable.
pub fn build_oracle<F: OracleFactory>(
    factory: &F,
    params_path: &Path,
    idf_path: &Path,
    initial: &PoseSnapshot,
) -> Result<F::Oracle> {
    require_file(params_path)?;
    require_file(idf_path)?;

    let params = CoverageParameters::load(params_path)?;
    let oracle = factory
        .build(&params, idf_path, initial)
        .map_err(|e| KshetraError::OracleConstruction(format!("{}: {}", factory.name(), e)))?;

    log::debug!(
        "Built {} oracle for {} robots from {}",
        factory.name(),
        initial.len(),
        idf_path.display()
    );
    Ok(oracle)
}
