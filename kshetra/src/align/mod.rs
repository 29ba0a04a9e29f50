//! Time alignment across streams sampled at different rates.
//!
//! ```text
//! mission_control ──► locate_window ──► [start, stop] (s)
//!                                          │
//!        poses (fine) ──► nearest_index ───┤──► sliced fine stream ──┐
//!   system maps (coarse) ──► nearest_index ┘──► sliced coarse stream ┤
//!                                                                    ▼
//!                                                    match_streams (coarse → fine)
//! ```

mod matcher;
mod nearest;
mod window;

pub use matcher::{gather, match_streams};
pub use nearest::nearest_index;
pub use window::{ExperimentWindow, NANOS_PER_SECOND, locate_window, rising_edge};
