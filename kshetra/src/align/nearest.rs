//! Nearest-neighbor timestamp lookup.

/// Index of the element of `sorted` closest to `target`.
///
/// `sorted` must be ascending. Ties (a target exactly between two samples)
/// resolve to the lower index. Returns `None` for an empty slice.
///
/// ```
/// use kshetra::align::nearest_index;
///
/// let t: Vec<f64> = (0..=10).map(|i| i as f64).collect();
/// assert_eq!(nearest_index(&t, 4.6), Some(5));
/// assert_eq!(nearest_index(&t, 4.5), Some(4));
/// ```
pub fn nearest_index(sorted: &[f64], target: f64) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }

    // First element >= target
    let upper = sorted.partition_point(|&t| t < target);
    if upper == 0 {
        return Some(0);
    }
    if upper == sorted.len() {
        return Some(sorted.len() - 1);
    }

    let below = upper - 1;
    if (target - sorted[below]).abs() <= (sorted[upper] - target).abs() {
        Some(below)
    } else {
        Some(upper)
    }
}
