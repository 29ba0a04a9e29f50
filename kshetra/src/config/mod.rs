//! Unified configuration loading for Kshetra.
//!
//! Loads processing settings from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kshetra::config::KshetraConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = KshetraConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = KshetraConfig::default();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Map size, binning factor, interpolation orders |
//! | [`PoseSection`] | Flattened pose stride and clamp range |
//! | [`OutputSection`] | Output directory, start-pose file, CSV export |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   map_size: 512
//!   binning_factor: 2
//!   global_order: 3   # cubic
//!   system_order: 1   # linear
//!
//! poses:
//!   dimensions: 3     # x, y, z per robot
//!
//! output:
//!   save_dir: ./processed
//!   pose_file_dir: /workspace/px4_multi_sim
//! ```

mod defaults;
mod error;
mod grid;
mod kshetra;
mod output;
mod poses;

pub use error::ConfigLoadError;
pub use kshetra::{DEFAULT_CONFIG_PATH, KshetraConfig};

pub use grid::GridSection;
pub use output::OutputSection;
pub use poses::PoseSection;
