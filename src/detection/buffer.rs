use crate::config::DetectorConfig;
use crate::error::AnalysisError;

/// A capture that satisfies every precondition of the detection pipeline.
///
/// Hosts can build one right after recording to reject an unusable capture
/// (empty, zero sample rate, shorter than one analysis window) before
/// spending any work on it.
#[derive(Debug, Clone, Copy)]
pub struct SampleBuffer<'a> {
    samples: &'a [f32],
    sample_rate: u32,
    chunk_size: usize,
}

impl<'a> SampleBuffer<'a> {
    pub fn new(
        samples: &'a [f32],
        sample_rate: u32,
        config: &DetectorConfig,
    ) -> Result<Self, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::invalid_input("empty audio samples"));
        }

        if sample_rate == 0 {
            return Err(AnalysisError::invalid_input("sample rate is zero"));
        }

        let chunk_size = config.chunk_size(sample_rate);
        if chunk_size < 1 {
            return Err(AnalysisError::invalid_input(format!(
                "{} ms window holds no samples at {} Hz",
                config.window_ms, sample_rate
            )));
        }

        if samples.len() < chunk_size {
            return Err(AnalysisError::invalid_input(format!(
                "{} samples is shorter than one {} ms window ({} samples)",
                samples.len(),
                config.window_ms,
                chunk_size
            )));
        }

        Ok(Self { samples, sample_rate, chunk_size })
    }

    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per analysis window
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of full windows; the trailing remainder is not counted
    pub fn num_chunks(&self) -> usize {
        self.samples.len() / self.chunk_size
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_buffer() {
        let samples = vec![0.1f32; 4900];
        let buffer = SampleBuffer::new(&samples, 48000, &DetectorConfig::default()).unwrap();
        assert_eq!(buffer.chunk_size(), 2400);
        assert_eq!(buffer.num_chunks(), 2);
        assert!((buffer.duration() - 4900.0 / 48000.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_empty_and_zero_rate() {
        let config = DetectorConfig::default();
        assert!(matches!(
            SampleBuffer::new(&[], 48000, &config),
            Err(AnalysisError::InvalidInput { .. })
        ));
        assert!(matches!(
            SampleBuffer::new(&[0.5], 0, &config),
            Err(AnalysisError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rejects_shorter_than_one_window() {
        let samples = vec![0.5f32; 2399];
        let err = SampleBuffer::new(&samples, 48000, &DetectorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("shorter than one"));
    }

    #[test]
    fn test_rejects_empty_window() {
        // 50ms at 10 Hz rounds down to zero samples
        let samples = vec![0.5f32; 100];
        assert!(SampleBuffer::new(&samples, 10, &DetectorConfig::default()).is_err());
    }
}
