use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, MEAN_ENERGY};

/// Dispersion statistics of an energy envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeStats {
    /// Mean RMS energy over all windows
    pub mean: f64,

    /// Population standard deviation of the RMS energy
    pub std_dev: f64,

    /// `std_dev / mean`
    pub relative_ratio: f64,
}

impl EnvelopeStats {
    /// Compute envelope statistics.
    ///
    /// Fails with `DivisionUndefined` when the mean energy is zero, which the
    /// pipeline reports as no sound rather than as an error.
    pub fn compute(envelope: &[f32]) -> Result<Self, AnalysisError> {
        if envelope.is_empty() {
            return Err(AnalysisError::invalid_input("energy envelope is empty"));
        }

        let n = envelope.len() as f64;
        let mean = envelope.iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = envelope
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        if mean == 0.0 {
            return Err(AnalysisError::division_undefined(MEAN_ENERGY));
        }

        Ok(Self {
            mean,
            std_dev,
            relative_ratio: std_dev / mean,
        })
    }

    /// Whether the envelope varies enough relative to its mean to contain sound events
    pub fn sound_detected(&self, relative_threshold: f64) -> bool {
        self.relative_ratio > relative_threshold
    }

    /// Energy level a window must reach to take part in peak picking
    pub fn peak_threshold(&self) -> f64 {
        self.mean + self.std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_envelope_has_no_sound() {
        let stats = EnvelopeStats::compute(&[0.3; 40]).unwrap();
        assert_relative_eq!(stats.mean, 0.3, epsilon = 1e-7);
        assert!(stats.std_dev < 1e-7);
        assert!(!stats.sound_detected(0.5));
    }

    #[test]
    fn test_population_std_dev() {
        let stats = EnvelopeStats::compute(&[0.0, 2.0]).unwrap();
        assert_relative_eq!(stats.mean, 1.0);
        assert_relative_eq!(stats.std_dev, 1.0);
        assert_relative_eq!(stats.relative_ratio, 1.0);
        assert_relative_eq!(stats.peak_threshold(), 2.0);
    }

    #[test]
    fn test_sparse_bursts_are_detected() {
        let mut envelope = vec![0.01f32; 100];
        for i in (10..100).step_by(15) {
            envelope[i] = 0.7;
        }
        let stats = EnvelopeStats::compute(&envelope).unwrap();
        assert!(stats.sound_detected(0.5));
    }

    #[test]
    fn test_threshold_is_strict() {
        let stats = EnvelopeStats::compute(&[0.0, 2.0]).unwrap();
        assert!(!stats.sound_detected(1.0));
        assert!(stats.sound_detected(0.999));
    }

    #[test]
    fn test_zero_energy_is_inconclusive() {
        let err = EnvelopeStats::compute(&[0.0; 8]).unwrap_err();
        assert!(err.is_inconclusive());
    }
}
