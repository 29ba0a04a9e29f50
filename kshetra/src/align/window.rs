//! Experiment window location from edge-triggered control channels.

use serde::{Deserialize, Serialize};

use crate::core::types::{MissionControlRecord, START_CHANNEL, STOP_CHANNEL, TimeSeries};
use crate::error::{KshetraError, Result};

/// Mission-control timestamps are recorded in nanoseconds.
pub const NANOS_PER_SECOND: f64 = 1e9;

/// Experiment time window in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentWindow {
    /// Start trigger time (seconds)
    pub start: f64,
    /// Stop trigger time (seconds)
    pub stop: f64,
}

impl ExperimentWindow {
    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}

/// Index of the first `false -> true` transition on `channel`.
///
/// The returned index is that of the first asserted sample after the edge.
/// `Ok(None)` means the channel never rises (constant, or already high at
/// the first sample).
pub fn rising_edge(
    control: &TimeSeries<MissionControlRecord>,
    channel: usize,
) -> Result<Option<usize>> {
    let states = control
        .values()
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.channel(channel).ok_or_else(|| {
                KshetraError::malformed(format!(
                    "mission-control record {} has {} channels, channel {} required",
                    i,
                    rec.width(),
                    channel
                ))
            })
        })
        .collect::<Result<Vec<bool>>>()?;

    Ok(states
        .windows(2)
        .position(|w| !w[0] && w[1])
        .map(|i| i + 1))
}

/// Locate the experiment window from the start and stop trigger channels.
///
/// Timestamps of `control` are in nanoseconds; the window is in seconds.
pub fn locate_window(control: &TimeSeries<MissionControlRecord>) -> Result<ExperimentWindow> {
    if control.is_empty() {
        return Err(KshetraError::empty("mission_control"));
    }

    let t = control.timestamps();
    let edge_time = |channel: usize, label: &str| -> Result<f64> {
        let idx = rising_edge(control, channel)?.ok_or_else(|| {
            KshetraError::DegenerateWindow(format!(
                "no rising edge on {} trigger (channel {}) in {} samples",
                label,
                channel,
                control.len()
            ))
        })?;
        Ok(t[idx] / NANOS_PER_SECOND)
    };

    let start = edge_time(START_CHANNEL, "start")?;
    let stop = edge_time(STOP_CHANNEL, "stop")?;

    if stop < start {
        return Err(KshetraError::DegenerateWindow(format!(
            "stop trigger at {:.3}s precedes start trigger at {:.3}s",
            stop, start
        )));
    }

    log::debug!(
        "Experiment window {:.3}s - {:.3}s ({:.3}s)",
        start,
        stop,
        stop - start
    );
    Ok(ExperimentWindow { start, stop })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a control stream with the given start/stop channel states.
    fn control(start: &[u8], stop: &[u8], step_ns: f64) -> TimeSeries<MissionControlRecord> {
        TimeSeries::from_pairs(start.iter().zip(stop).enumerate().map(|(i, (&s, &e))| {
            (
                i as f64 * step_ns,
                MissionControlRecord::new(vec![false, false, s != 0, e != 0]),
            )
        }))
    }

    #[test]
    fn test_reference_scenario() {
        let ctl = control(&[0, 0, 1, 1, 1], &[0, 0, 0, 0, 1], 1e9);
        let window = locate_window(&ctl).unwrap();
        assert_eq!(window.start, 2.0);
        assert_eq!(window.stop, 4.0);
        assert_eq!(window.duration(), 2.0);
    }

    #[test]
    fn test_first_edge_wins() {
        let ctl = control(&[0, 1, 0, 1, 1], &[0, 0, 0, 0, 1], 1e9);
        assert_eq!(rising_edge(&ctl, START_CHANNEL).unwrap(), Some(1));
    }

    #[test]
    fn test_no_edge_is_explicit_error() {
        let ctl = control(&[0, 0, 0, 0], &[0, 0, 0, 1], 1e9);
        let err = locate_window(&ctl).unwrap_err();
        assert!(matches!(err, KshetraError::DegenerateWindow(_)));
    }

    #[test]
    fn test_high_from_start_has_no_edge() {
        let ctl = control(&[1, 1, 1], &[0, 0, 1], 1e9);
        assert_eq!(rising_edge(&ctl, START_CHANNEL).unwrap(), None);
        assert!(locate_window(&ctl).is_err());
    }

    #[test]
    fn test_stop_before_start_rejected() {
        let ctl = control(&[0, 0, 0, 1], &[0, 1, 1, 1], 1e9);
        let err = locate_window(&ctl).unwrap_err();
        assert!(matches!(err, KshetraError::DegenerateWindow(_)));
    }

    #[test]
    fn test_window_monotonic() {
        for stop_at in 2..6 {
            let start: Vec<u8> = (0..6).map(|i| u8::from(i >= 2)).collect();
            let stop: Vec<u8> = (0..6).map(|i| u8::from(i >= stop_at)).collect();
            let window = locate_window(&control(&start, &stop, 5e8)).unwrap();
            assert!(window.stop >= window.start);
        }
    }

    #[test]
    fn test_narrow_record_is_malformed() {
        let ctl = TimeSeries::from_pairs([
            (0.0, MissionControlRecord::new(vec![false, false])),
            (1.0, MissionControlRecord::new(vec![true, true])),
        ]);
        let err = locate_window(&ctl).unwrap_err();
        assert!(matches!(err, KshetraError::MalformedRecord(_)));
    }

    #[test]
    fn test_empty_control() {
        let ctl: TimeSeries<MissionControlRecord> = TimeSeries::default();
        assert!(matches!(
            locate_window(&ctl).unwrap_err(),
            KshetraError::EmptyStream(_)
        ));
    }
}
