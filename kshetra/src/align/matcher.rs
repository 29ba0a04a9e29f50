//! Cross-stream matching between a high-rate and a low-rate stream.

use super::nearest::nearest_index;
use crate::error::{KshetraError, Result};

/// For every `coarse` timestamp, the index of the nearest `fine` timestamp.
///
/// Both slices must be ascending. The result has exactly `coarse.len()`
/// entries, each in `[0, fine.len())`, and equals the row-wise arg-min of the
/// pairwise `|coarse[i] - fine[j]|` matrix (ties to the lower `j`).
///
/// Uses one binary search per coarse sample, so the cost is
/// O(m log n) instead of the O(m n) of materializing the matrix.
pub fn match_streams(fine: &[f64], coarse: &[f64]) -> Result<Vec<usize>> {
    if fine.is_empty() {
        return Err(KshetraError::empty("fine stream has no samples to match against"));
    }

    Ok(coarse
        .iter()
        .map(|&t| nearest_index(fine, t).unwrap_or(0))
        .collect())
}

/// Select `items[i]` for every index in `indices`.
pub fn gather<T: Clone>(items: &[T], indices: &[usize]) -> Result<Vec<T>> {
    indices
        .iter()
        .map(|&i| {
            items.get(i).cloned().ok_or_else(|| {
                KshetraError::malformed(format!(
                    "match index {} out of range for {} samples",
                    i,
                    items.len()
                ))
            })
        })
        .collect()
}
