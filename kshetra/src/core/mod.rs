//! Core types shared by every pipeline stage.

pub mod types;

pub use types::{BinnedSample, DenseMap, MissionControlRecord, Point2D, PoseSnapshot, TimeSeries};
