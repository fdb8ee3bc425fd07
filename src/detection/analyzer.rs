use rayon::prelude::*;

use super::buffer::SampleBuffer;
use super::envelope::energy_envelope;
use super::normalize::normalize;
use super::peaks::{peak_times, pick_peaks};
use super::presence::EnvelopeStats;
use super::rate::RateEstimate;
use super::types::{AnalysisReport, ClassificationResult};
use crate::audio::AudioData;
use crate::config::DetectorConfig;
use crate::error::AnalysisError;

/// Sound-presence and pulsatility analyzer for fixed-length captures
#[derive(Debug, Clone, Default)]
pub struct PulseAnalyzer {
    config: DetectorConfig,
}

impl PulseAnalyzer {
    /// Create a new analyzer with default configuration
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create a new analyzer with custom configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Classify one capture
    pub fn analyze(&self, samples: &[f32], sample_rate: u32) -> ClassificationResult {
        self.analyze_detailed(samples, sample_rate).classification
    }

    /// Classify one capture and keep the intermediate results
    pub fn analyze_detailed(&self, samples: &[f32], sample_rate: u32) -> AnalysisReport {
        tracing::info!(
            "Starting pulse analysis: {} samples at {} Hz",
            samples.len(),
            sample_rate
        );

        let mut report = AnalysisReport::new(sample_rate, samples.len(), self.config.window_seconds());

        report.classification = match self.run(samples, sample_rate, &mut report) {
            Ok(classification) => classification,
            Err(err) if err.is_inconclusive() => {
                tracing::debug!("Inconclusive envelope, reporting no sound: {}", err);
                ClassificationResult::NoSound
            }
            Err(err) => {
                tracing::warn!("Analysis failed: {}", err);
                ClassificationResult::AnalysisError(err)
            }
        };

        match report.bpm {
            Some(bpm) => tracing::info!(
                "Analysis complete: {} ({} events, {:.1} bpm)",
                report.classification.label(),
                report.peaks.len(),
                bpm
            ),
            None => tracing::info!("Analysis complete: {}", report.classification.label()),
        }

        report
    }

    /// Classify a loaded recording, downmixed to mono
    pub fn analyze_audio(&self, audio: &AudioData) -> AnalysisReport {
        let mono = audio.mono_samples();
        self.analyze_detailed(&mono, audio.sample_rate)
    }

    /// Classify independent recordings in parallel, preserving input order
    pub fn analyze_batch(&self, recordings: &[AudioData]) -> Vec<AnalysisReport> {
        recordings
            .par_iter()
            .map(|audio| self.analyze_audio(audio))
            .collect()
    }

    fn run(
        &self,
        samples: &[f32],
        sample_rate: u32,
        report: &mut AnalysisReport,
    ) -> Result<ClassificationResult, AnalysisError> {
        let normalized = normalize(samples)?;
        let buffer = SampleBuffer::new(&normalized, sample_rate, &self.config)?;

        report.envelope = energy_envelope(buffer.samples(), buffer.chunk_size())?;

        let stats = EnvelopeStats::compute(&report.envelope)?;
        report.stats = Some(stats);

        tracing::debug!(
            "Envelope stats: mean={:.6}, std={:.6}, ratio={:.3} (threshold {:.3})",
            stats.mean,
            stats.std_dev,
            stats.relative_ratio,
            self.config.relative_threshold
        );

        if !stats.sound_detected(self.config.relative_threshold) {
            return Ok(ClassificationResult::NoSound);
        }

        let window_seconds = self.config.window_seconds();
        report.peaks = pick_peaks(&report.envelope, &stats, self.config.min_peak_distance);
        report.peak_times = peak_times(&report.peaks, window_seconds);

        let rate = RateEstimate::from_peaks(&report.peaks, window_seconds)?;
        report.bpm = Some(rate.bpm);

        Ok(rate.pulsatility(&self.config).into())
    }
}
