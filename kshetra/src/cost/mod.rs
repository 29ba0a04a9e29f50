//! Coverage cost: oracle construction and normalized replay.
//!
//! The oracle is an injected collaborator behind [`CoverageOracle`]; the
//! pipeline only ever sets positions and reads the objective. The bundled
//! [`LocationalCostFactory`] evaluates the Lloyd locational cost over an
//! IDF of Gaussian features.

mod idf;
mod locational;
mod oracle;
mod parameters;
mod replay;

pub use idf::{GaussianFeature, WorldIdf};
pub use locational::{LocationalCostFactory, LocationalCostOracle};
pub use oracle::{CoverageOracle, OracleError, OracleFactory, build_oracle, require_file};
pub use parameters::CoverageParameters;
pub use replay::replay_cost;

#[cfg(test)]
pub(crate) use oracle::mock;
