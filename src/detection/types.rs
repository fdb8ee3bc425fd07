use std::fmt;

use serde::Serialize;

use super::presence::EnvelopeStats;
use super::rate::Pulsatility;
use crate::error::AnalysisError;

/// Terminal outcome of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ClassificationResult {
    /// No sound event in the capture
    NoSound,

    /// Events recur at a rate inside the pulse band
    Pulsatile,

    /// Events recur outside the pulse band
    NonPulsatile,

    /// The capture could not be classified
    AnalysisError(AnalysisError),
}

impl ClassificationResult {
    /// Whether sound was found in the capture, even if its rate could not be estimated
    pub fn sound_detected(&self) -> bool {
        match self {
            Self::Pulsatile | Self::NonPulsatile => true,
            Self::AnalysisError(AnalysisError::InsufficientPeaks { .. }) => true,
            _ => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::AnalysisError(_))
    }

    /// Label shown to operators
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoSound => "No Sound",
            Self::Pulsatile => "Pulsatile",
            Self::NonPulsatile => "Non-Pulsatile",
            Self::AnalysisError(_) => "Analysis Error",
        }
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnalysisError(err) => write!(f, "{} ({})", self.label(), err),
            _ => f.write_str(self.label()),
        }
    }
}

impl From<Pulsatility> for ClassificationResult {
    fn from(pulsatility: Pulsatility) -> Self {
        match pulsatility {
            Pulsatility::Pulsatile => Self::Pulsatile,
            Pulsatility::NonPulsatile => Self::NonPulsatile,
        }
    }
}

/// Everything one analysis derived, for hosts that plot or log it.
///
/// Fields past the stage where the pipeline stopped are left empty.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub classification: ClassificationResult,

    pub sample_rate: u32,

    /// Capture duration in seconds
    pub duration_seconds: f64,

    /// Analysis window duration in seconds
    pub window_seconds: f64,

    /// RMS energy per window
    pub envelope: Vec<f32>,

    pub stats: Option<EnvelopeStats>,

    /// Window indices of the detected events
    pub peaks: Vec<usize>,

    /// Seconds from the start of the capture to each event
    pub peak_times: Vec<f64>,

    /// Events per minute, when at least two events were found
    pub bpm: Option<f64>,
}

impl AnalysisReport {
    pub(crate) fn new(sample_rate: u32, num_samples: usize, window_seconds: f64) -> Self {
        let duration_seconds = if sample_rate > 0 {
            num_samples as f64 / sample_rate as f64
        } else {
            0.0
        };

        Self {
            classification: ClassificationResult::NoSound,
            sample_rate,
            duration_seconds,
            window_seconds,
            envelope: Vec::new(),
            stats: None,
            peaks: Vec::new(),
            peak_times: Vec::new(),
            bpm: None,
        }
    }
}
