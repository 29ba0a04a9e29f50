//! Sorted, de-duplicated timestamp collections.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::align::nearest_index;

/// A collection of timestamped values, sorted ascending by timestamp.
///
/// Samples may arrive in any order. Construction sorts them and collapses
/// duplicate timestamps, keeping the sample that was ingested last.
/// Non-finite timestamps are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries<T> {
    timestamps: Vec<f64>,
    values: Vec<T>,
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self {
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> TimeSeries<T> {
    /// Build a series from `(timestamp, value)` pairs in ingestion order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, T)>) -> Self {
        let mut dropped = 0usize;
        let mut pairs: Vec<(f64, T)> = pairs
            .into_iter()
            .filter(|(t, _)| {
                let keep = t.is_finite();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();
        if dropped > 0 {
            log::warn!("Dropped {} samples with non-finite timestamps", dropped);
        }

        // Stable sort keeps ingestion order within equal timestamps
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut timestamps: Vec<f64> = Vec::with_capacity(pairs.len());
        let mut values: Vec<T> = Vec::with_capacity(pairs.len());
        for (t, v) in pairs {
            if timestamps.last() == Some(&t) {
                if let Some(slot) = values.last_mut() {
                    *slot = v;
                }
            } else {
                timestamps.push(t);
                values.push(v);
            }
        }

        Self { timestamps, values }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Sorted timestamps.
    #[inline]
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Values in timestamp order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// `(timestamp, value)` at `index`.
    pub fn get(&self, index: usize) -> Option<(f64, &T)> {
        Some((*self.timestamps.get(index)?, self.values.get(index)?))
    }

    /// Earliest `(timestamp, value)`.
    pub fn first(&self) -> Option<(f64, &T)> {
        self.get(0)
    }

    /// Index of the sample nearest to `target` (ties resolve to the lower index).
    pub fn nearest_index(&self, target: f64) -> Option<usize> {
        nearest_index(&self.timestamps, target)
    }

    /// Inclusive index range covering `[start, stop]` by nearest-neighbor
    /// alignment of both boundaries.
    pub fn window_range(&self, start: f64, stop: f64) -> Option<RangeInclusive<usize>> {
        let first = self.nearest_index(start)?;
        let last = self.nearest_index(stop)?;
        (first <= last).then_some(first..=last)
    }

    /// Map every value while preserving timestamps.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> TimeSeries<U> {
        TimeSeries {
            timestamps: self.timestamps,
            values: self.values.into_iter().map(f).collect(),
        }
    }

    /// Map every value with a fallible function, stopping at the first error.
    pub fn try_map<U, E, F: FnMut(T) -> Result<U, E>>(self, f: F) -> Result<TimeSeries<U>, E> {
        let values = self.values.into_iter().map(f).collect::<Result<Vec<U>, E>>()?;
        Ok(TimeSeries {
            timestamps: self.timestamps,
            values,
        })
    }

    /// Split into timestamps and values.
    pub fn into_parts(self) -> (Vec<f64>, Vec<T>) {
        (self.timestamps, self.values)
    }
}

impl<T: Clone> TimeSeries<T> {
    /// Copy out the samples in `range`.
    pub fn slice(&self, range: RangeInclusive<usize>) -> TimeSeries<T> {
        let end = (*range.end()).min(self.len().saturating_sub(1));
        let start = *range.start();
        if self.is_empty() || start > end {
            return TimeSeries::default();
        }
        TimeSeries {
            timestamps: self.timestamps[start..=end].to_vec(),
            values: self.values[start..=end].to_vec(),
        }
    }
}

/// Shift a timestamp sequence so it starts at zero.
pub fn rebase_to_zero(timestamps: &mut [f64]) {
    if let Some(&origin) = timestamps.first() {
        for t in timestamps.iter_mut() {
            *t -= origin;
        }
    }
}
