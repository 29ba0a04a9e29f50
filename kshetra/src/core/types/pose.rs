//! Robot position types.

use serde::{Deserialize, Serialize};

/// A 2D point in world-grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate (grid column axis)
    pub x: f32,
    /// Y coordinate (grid row axis)
    pub y: f32,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into `[min, max]`.
    #[inline]
    pub fn clamped(self, min: f32, max: f32) -> Self {
        Self {
            x: self.x.clamp(min, max),
            y: self.y.clamp(min, max),
        }
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Positions of every robot at one instant.
///
/// Robot `i` is at index `i` in every snapshot of a stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseSnapshot {
    positions: Vec<Point2D>,
}

impl PoseSnapshot {
    /// Create a snapshot from positions ordered by robot index.
    pub fn new(positions: Vec<Point2D>) -> Self {
        Self { positions }
    }

    /// Decode a flattened `[x0, y0, (z0,) x1, y1, ...]` array.
    ///
    /// `stride` is the number of values per robot (2 or 3); anything past the
    /// first two components is ignored. Returns `None` when the length is not
    /// a multiple of the stride or the stride is below 2.
    pub fn from_flat(values: &[f64], stride: usize) -> Option<Self> {
        if stride < 2 || values.len() % stride != 0 {
            return None;
        }
        let positions = values
            .chunks_exact(stride)
            .map(|c| Point2D::new(c[0] as f32, c[1] as f32))
            .collect();
        Some(Self { positions })
    }

    /// Clamp every position into `[min, max]` on both axes.
    pub fn clamped(self, min: f32, max: f32) -> Self {
        Self {
            positions: self
                .positions
                .into_iter()
                .map(|p| p.clamped(min, max))
                .collect(),
        }
    }

    /// Number of robots.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the snapshot holds no robots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions ordered by robot index.
    #[inline]
    pub fn positions(&self) -> &[Point2D] {
        &self.positions
    }

    /// Position of robot `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Point2D> {
        self.positions.get(index)
    }
}
