//! Density map types.

use serde::{Deserialize, Serialize};

/// One observed cell of a sparse, binned density map.
///
/// Coordinates are in full-resolution grid units; the densifier divides them
/// by the binning factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinnedSample {
    /// Column coordinate (x)
    pub cell_x: i64,
    /// Row coordinate (y)
    pub cell_y: i64,
    /// Density in [0, 1]
    pub value: f32,
}

impl BinnedSample {
    /// Create a new sample.
    pub fn new(cell_x: i64, cell_y: i64, value: f32) -> Self {
        Self {
            cell_x,
            cell_y,
            value,
        }
    }

    /// Decode a flattened `[x0, y0, v0, x1, y1, v1, ...]` array.
    ///
    /// Coordinates are truncated toward zero. Returns `None` when the length
    /// is not a multiple of three.
    pub fn decode_triples(values: &[f64]) -> Option<Vec<Self>> {
        if values.len() % 3 != 0 {
            return None;
        }
        Some(
            values
                .chunks_exact(3)
                .map(|c| Self::new(c[0] as i64, c[1] as i64, c[2] as f32))
                .collect(),
        )
    }
}

/// Row-major 2D grid of densities. `NaN` marks unknown cells.
///
/// Indexing is `(row, col)` = `(y, x)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMap {
    rows: usize,
    cols: usize,
    cells: Vec<f32>,
}

impl DenseMap {
    /// Create a grid filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    /// Create a grid of unknown cells.
    pub fn unknown(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, f32::NAN)
    }

    /// Number of rows (y extent).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (x extent).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at `(row, col)`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set the value at `(row, col)`. Returns false if out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> bool {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = value;
            true
        } else {
            false
        }
    }

    /// Raw row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Mutable raw row-major cell slice.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// One row as a slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Clip every known cell into `[min, max]`; unknown cells stay `NaN`.
    pub fn clip(&mut self, min: f32, max: f32) {
        for v in self.cells.iter_mut() {
            *v = v.clamp(min, max);
        }
    }

    /// Number of cells that are not `NaN`.
    pub fn known_count(&self) -> usize {
        self.cells.iter().filter(|v| !v.is_nan()).count()
    }

    /// Fraction of cells that are known.
    pub fn known_fraction(&self) -> f32 {
        if self.cells.is_empty() {
            0.0
        } else {
            self.known_count() as f32 / self.cells.len() as f32
        }
    }
}
