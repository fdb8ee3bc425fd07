use serde::{Deserialize, Serialize};

use crate::config::DetectorConfig;
use crate::error::{AnalysisError, AVERAGE_INTERVAL};

/// Event rate derived from inter-peak intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEstimate {
    /// Seconds between consecutive peaks
    pub intervals: Vec<f64>,

    /// Mean of `intervals`
    pub average_interval: f64,

    /// Events per minute
    pub bpm: f64,
}

impl RateEstimate {
    /// Estimate the rate from the ordered peak windows.
    ///
    /// Intervals are taken from index differences scaled by the window
    /// duration, which equals differencing the peak timestamps but keeps
    /// evenly spaced peaks exactly evenly spaced in floating point.
    pub fn from_peaks(peaks: &[usize], window_seconds: f64) -> Result<Self, AnalysisError> {
        if peaks.len() < 2 {
            return Err(AnalysisError::InsufficientPeaks { found: peaks.len() });
        }

        let intervals = peaks
            .windows(2)
            .map(|pair| pair[1].saturating_sub(pair[0]) as f64 * window_seconds)
            .collect();

        Self::from_intervals(intervals)
    }

    pub fn from_intervals(intervals: Vec<f64>) -> Result<Self, AnalysisError> {
        if intervals.is_empty() {
            return Err(AnalysisError::InsufficientPeaks { found: intervals.len() });
        }

        let average_interval = intervals.iter().sum::<f64>() / intervals.len() as f64;
        if average_interval == 0.0 {
            return Err(AnalysisError::division_undefined(AVERAGE_INTERVAL));
        }

        let bpm = 60.0 / average_interval;

        tracing::debug!(
            "Rate estimate: {:.1} bpm from {} intervals (average {:.3}s)",
            bpm,
            intervals.len(),
            average_interval
        );

        Ok(Self { intervals, average_interval, bpm })
    }

    /// Classify against the configured pulsatile band
    pub fn pulsatility(&self, config: &DetectorConfig) -> Pulsatility {
        if config.is_pulsatile_rate(self.bpm) {
            Pulsatility::Pulsatile
        } else {
            Pulsatility::NonPulsatile
        }
    }
}

/// Whether an event rate falls inside the physiological pulse band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pulsatility {
    Pulsatile,
    NonPulsatile,
}
