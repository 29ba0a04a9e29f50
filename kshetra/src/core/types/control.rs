//! Mission-control records.

use serde::{Deserialize, Serialize};

/// Channel index of the experiment start trigger.
pub const START_CHANNEL: usize = 2;

/// Channel index of the experiment stop trigger.
pub const STOP_CHANNEL: usize = 3;

/// Discrete control channels sampled at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissionControlRecord {
    channels: Vec<bool>,
}

impl MissionControlRecord {
    /// Create a record from channel states.
    pub fn new(channels: Vec<bool>) -> Self {
        Self { channels }
    }

    /// Decode raw numeric channel values; non-zero means asserted.
    pub fn from_raw(values: &[f64]) -> Self {
        Self {
            channels: values.iter().map(|&v| v != 0.0).collect(),
        }
    }

    /// State of `channel`, or `None` if the record is narrower than that.
    #[inline]
    pub fn channel(&self, channel: usize) -> Option<bool> {
        self.channels.get(channel).copied()
    }

    /// Number of channels.
    #[inline]
    pub fn width(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        let rec = MissionControlRecord::from_raw(&[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(rec.width(), 4);
        assert_eq!(rec.channel(START_CHANNEL), Some(true));
        assert_eq!(rec.channel(STOP_CHANNEL), Some(false));
        assert_eq!(rec.channel(4), None);
    }
}
