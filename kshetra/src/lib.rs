//! # Kshetra
//!
//! Offline analysis of multi-robot coverage-control experiments.
//!
//! ## Overview
//!
//! A recording is a set of extracted log tables: robot poses at a high
//! rate, sparse binned density maps at a low rate, and edge-triggered
//! mission-control channels. Kshetra turns one recording into a single
//! [`ProcessedBag`]:
//!
//! - **Window**: start/stop triggers on the control channels bound the experiment
//! - **Align**: both streams are sliced to the window by nearest timestamp
//! - **Match**: every map step is paired with its nearest pose
//! - **Densify**: binned maps are upsampled to full resolution and clipped to `[0, 1]`
//! - **Replay**: poses are replayed through a coverage oracle, cost normalized to the start
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kshetra::{BagProcessor, KshetraConfig, LocationalCostFactory, LogTables, OracleResources};
//!
//! let processor = BagProcessor::new(
//!     KshetraConfig::load_default()?,
//!     OracleResources::new("configs/coverage_params.toml", "configs/world.idf"),
//!     LocationalCostFactory,
//! )?;
//!
//! let tables = LogTables::load("bags/run_01/run_01.tables")?;
//! let bag = processor.process("run_01", &tables)?;
//! println!("{} steps, final cost {:?}", bag.t_fine().len(), bag.final_cost());
//! ```
//!
//! ## Grid Convention
//!
//! Maps are row-major with `y` as the row index and `x` as the column index.
//! `NaN` marks cells that were never observed.

#![warn(missing_docs)]

// Core types
pub mod core;

// Errors
pub mod error;

// Unified configuration
pub mod config;

// Time alignment
pub mod align;

// Map densification
pub mod grid;

// Coverage cost oracle and replay
pub mod cost;

// File formats
pub mod io;

// Per-bag processing and batch driver
pub mod pipeline;

pub use crate::core::{
    BinnedSample, DenseMap, MissionControlRecord, Point2D, PoseSnapshot, TimeSeries,
};

pub use align::{ExperimentWindow, locate_window, match_streams, nearest_index};
pub use config::{ConfigLoadError, KshetraConfig};
pub use cost::{
    CoverageOracle, CoverageParameters, LocationalCostFactory, OracleError, OracleFactory,
    replay_cost,
};
pub use error::{KshetraError, Result};
pub use grid::{DensifyConfig, Interpolation, densify};
pub use io::{LogTables, TableRecord, TablesRecorder, load_processed, save_processed};
pub use pipeline::{
    BagProcessor, BagSelection, BatchReport, OracleResources, ProcessedBag, run_batch,
};
