//! Density map reconstruction.
//!
//! Logs store only observed cells of each density map, at a reduced
//! resolution. This module rebuilds a dense full-resolution grid from them:
//!
//! ```text
//! [(x, y, v), ...] ──scatter──► (N/b)×(N/b) grid, NaN = unknown
//!                                   │
//!                                   ▼ zoom ×b (nearest / linear / cubic)
//!                               N×N grid ──clip [0, 1]──► DenseMap
//! ```

mod densify;
mod resample;

pub use densify::{DensifyConfig, densify};
pub use resample::{Interpolation, zoom};
