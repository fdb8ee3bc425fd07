//! # Pulse Classifier
//!
//! Detect sound events in a fixed-length audio capture and classify their
//! temporal pattern as pulsatile (rhythmic, heartbeat-like) or non-pulsatile.
//!
//! The analysis is a pure function of the samples, the sample rate and a
//! [`DetectorConfig`]: no I/O, no shared state, no clock. Each call owns its
//! working buffers, so independent recordings can be analyzed concurrently.
//!
//! ## Quick Start
//!
//! ```rust
//! use pulse_classifier::{analyze, ClassificationResult, DetectorConfig};
//!
//! // 30 seconds of a steady tone: plenty of energy, but no events
//! let sample_rate = 48000;
//! let samples: Vec<f32> = (0..sample_rate as usize * 30)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin())
//!     .collect();
//!
//! let result = analyze(&samples, sample_rate, &DetectorConfig::default());
//! assert_eq!(result, ClassificationResult::NoSound);
//! ```
//!
//! ## Architecture
//!
//! - [`detection`] - normalizer, windower, energy envelope, presence detector,
//!   peak picker and rate classifier
//! - [`audio`] - WAV loading for hosts that analyze files
//! - [`config`] - detector constants and TOML configuration

pub mod audio;
pub mod config;
pub mod detection;
pub mod error;

pub use crate::{
    config::{Config, DetectorConfig},
    detection::{AnalysisReport, ClassificationResult, PulseAnalyzer},
    error::{AnalysisError, PulseError, Result},
};

/// Classify one capture.
///
/// Always returns exactly one of `NoSound`, `Pulsatile`, `NonPulsatile` or
/// `AnalysisError`; never panics on malformed input.
pub fn analyze(signal: &[f32], sample_rate: u32, config: &DetectorConfig) -> ClassificationResult {
    PulseAnalyzer::with_config(config.clone()).analyze(signal, sample_rate)
}

/// Classify one capture and return the energy envelope, statistics and
/// peaks alongside the classification.
pub fn analyze_detailed(signal: &[f32], sample_rate: u32, config: &DetectorConfig) -> AnalysisReport {
    PulseAnalyzer::with_config(config.clone()).analyze_detailed(signal, sample_rate)
}
