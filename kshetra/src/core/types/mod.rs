//! Core data types for the analysis pipeline.
//!
//! - [`TimeSeries<T>`]: Sorted, de-duplicated sample collection
//! - [`Point2D`], [`PoseSnapshot`]: Robot positions
//! - [`BinnedSample`], [`DenseMap`]: Sparse and dense density maps
//! - [`MissionControlRecord`]: Edge-triggered control channels

mod control;
mod map;
mod pose;
mod series;

pub use control::{MissionControlRecord, START_CHANNEL, STOP_CHANNEL};
pub use map::{BinnedSample, DenseMap};
pub use pose::{Point2D, PoseSnapshot};
pub use series::{TimeSeries, rebase_to_zero};
