//! Separable polynomial resampling of density grids.
//!
//! Output cell `o` samples the source at the pixel-centered coordinate
//!
//! ```text
//! src = (o + 0.5) / factor - 0.5
//! ```
//!
//! so a source cell covers exactly `factor` output cells along each axis.
//! Source indices beyond the border are clamped to the edge. A `NaN` source
//! cell poisons every output cell whose kernel weights it non-zero.

use serde::{Deserialize, Serialize};

use crate::core::types::DenseMap;

/// Keys cubic convolution parameter.
const CUBIC_A: f32 = -0.5;

/// Interpolation kernel, named by polynomial order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Order 0: nearest source cell
    Nearest,
    /// Order 1: bilinear
    Linear,
    /// Order 3: cubic convolution
    Cubic,
}

impl Interpolation {
    /// Kernel for a polynomial order (0, 1 or 3).
    pub fn from_order(order: u8) -> Option<Self> {
        match order {
            0 => Some(Interpolation::Nearest),
            1 => Some(Interpolation::Linear),
            3 => Some(Interpolation::Cubic),
            _ => None,
        }
    }

    /// Polynomial order of the kernel.
    pub fn order(&self) -> u8 {
        match self {
            Interpolation::Nearest => 0,
            Interpolation::Linear => 1,
            Interpolation::Cubic => 3,
        }
    }
}

/// One weighted source index.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    index: usize,
    weight: f32,
}

fn cubic_weight(s: f32) -> f32 {
    let s = s.abs();
    if s <= 1.0 {
        (CUBIC_A + 2.0) * s * s * s - (CUBIC_A + 3.0) * s * s + 1.0
    } else if s < 2.0 {
        CUBIC_A * s * s * s - 5.0 * CUBIC_A * s * s + 8.0 * CUBIC_A * s - 4.0 * CUBIC_A
    } else {
        0.0
    }
}

/// Source taps for output index `out` along one axis.
///
/// Clamped indices are merged and zero weights dropped.
fn taps_for(out: usize, factor: usize, src_len: usize, interp: Interpolation) -> Vec<Tap> {
    let last = src_len as isize - 1;
    let x = (out as f32 + 0.5) / factor as f32 - 0.5;
    let clamp = |i: isize| i.clamp(0, last) as usize;

    let raw: Vec<(isize, f32)> = match interp {
        Interpolation::Nearest => vec![(x.round() as isize, 1.0)],
        Interpolation::Linear => {
            let i0 = x.floor();
            let t = x - i0;
            let i0 = i0 as isize;
            vec![(i0, 1.0 - t), (i0 + 1, t)]
        }
        Interpolation::Cubic => {
            let i1 = x.floor();
            let t = x - i1;
            let i1 = i1 as isize;
            vec![
                (i1 - 1, cubic_weight(t + 1.0)),
                (i1, cubic_weight(t)),
                (i1 + 1, cubic_weight(1.0 - t)),
                (i1 + 2, cubic_weight(2.0 - t)),
            ]
        }
    };

    let mut taps: Vec<Tap> = Vec::with_capacity(raw.len());
    for (i, w) in raw {
        let index = clamp(i);
        match taps.iter_mut().find(|tap| tap.index == index) {
            Some(tap) => tap.weight += w,
            None => taps.push(Tap { index, weight: w }),
        }
    }
    taps.retain(|tap| tap.weight != 0.0);
    taps
}

/// Upsample `src` by an integer `factor` along both axes.
///
/// The result has `src.rows() * factor` rows and `src.cols() * factor`
/// columns. Values are not clipped here.
pub fn zoom(src: &DenseMap, factor: usize, interp: Interpolation) -> DenseMap {
    let rows = src.rows() * factor;
    let cols = src.cols() * factor;
    let mut out = DenseMap::unknown(rows, cols);
    if rows == 0 || cols == 0 {
        return out;
    }

    let row_taps: Vec<Vec<Tap>> = (0..rows)
        .map(|r| taps_for(r, factor, src.rows(), interp))
        .collect();
    let col_taps: Vec<Vec<Tap>> = (0..cols)
        .map(|c| taps_for(c, factor, src.cols(), interp))
        .collect();

    let cells = out.cells_mut();
    for (r, rt) in row_taps.iter().enumerate() {
        for (c, ct) in col_taps.iter().enumerate() {
            let mut acc = 0.0f32;
            for wr in rt {
                let src_row = src.row(wr.index);
                for wc in ct {
                    acc += wr.weight * wc.weight * src_row[wc.index];
                }
            }
            cells[r * cols + c] = acc;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_order() {
        assert_eq!(Interpolation::from_order(0), Some(Interpolation::Nearest));
        assert_eq!(Interpolation::from_order(1), Some(Interpolation::Linear));
        assert_eq!(Interpolation::from_order(3), Some(Interpolation::Cubic));
        assert_eq!(Interpolation::from_order(2), None);
        assert_eq!(Interpolation::Cubic.order(), 3);
    }

    #[test]
    fn test_cubic_kernel_interpolates() {
        assert_relative_eq!(cubic_weight(0.0), 1.0);
        assert_relative_eq!(cubic_weight(1.0), 0.0);
        assert_relative_eq!(cubic_weight(2.0), 0.0);
        // Partition of unity
        for k in 0..10 {
            let t = k as f32 / 10.0;
            let sum = cubic_weight(t + 1.0)
                + cubic_weight(t)
                + cubic_weight(1.0 - t)
                + cubic_weight(2.0 - t);
            assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_taps_weights_sum_to_one() {
        for interp in [
            Interpolation::Nearest,
            Interpolation::Linear,
            Interpolation::Cubic,
        ] {
            for out in 0..16 {
                let taps = taps_for(out, 2, 8, interp);
                let sum: f32 = taps.iter().map(|t| t.weight).sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
                assert!(taps.iter().all(|t| t.index < 8));
            }
        }
    }

    #[test]
    fn test_nearest_block_mapping() {
        for out in 0..8 {
            let taps = taps_for(out, 2, 4, Interpolation::Nearest);
            assert_eq!(taps, vec![Tap { index: out / 2, weight: 1.0 }]);
        }
    }

    #[test]
    fn test_zoom_shape() {
        let src = DenseMap::filled(3, 5, 0.5);
        let out = zoom(&src, 2, Interpolation::Linear);
        assert_eq!(out.rows(), 6);
        assert_eq!(out.cols(), 10);
        assert!(out.cells().iter().all(|&v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_linear_nan_propagates_to_neighbors_only() {
        let mut src = DenseMap::filled(4, 4, 1.0);
        src.set(0, 0, f32::NAN);
        let out = zoom(&src, 2, Interpolation::Linear);

        // The top-left 3x3 output cells touch source (0, 0)
        assert!(out.get(0, 0).unwrap().is_nan());
        assert!(out.get(2, 2).unwrap().is_nan());
        // Far away cells are unaffected
        assert_relative_eq!(out.get(7, 7).unwrap(), 1.0);
        assert_relative_eq!(out.get(0, 4).unwrap(), 1.0);
    }

    #[test]
    fn test_cubic_overshoots_on_step() {
        let mut src = DenseMap::filled(1, 8, 0.0);
        for c in 4..8 {
            src.set(0, c, 1.0);
        }
        let out = zoom(&src, 2, Interpolation::Cubic);
        let max = out.cells().iter().cloned().fold(f32::MIN, f32::max);
        let min = out.cells().iter().cloned().fold(f32::MAX, f32::min);
        assert!(max > 1.0);
        assert!(min < 0.0);
    }
}
