use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for the pulse classifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detection pipeline constants
    pub detector: DetectorConfig,

    /// What the recording host is expected to capture
    pub recording: RecordingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.detector.validate()?;
        self.recording.validate()?;
        Ok(())
    }
}

/// Constants of the detection pipeline.
///
/// The defaults were chosen empirically on 30 s objective-tinnitus captures
/// and have not been validated beyond that; override them per call rather
/// than assuming they are optimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Analysis window duration in milliseconds
    pub window_ms: u32,

    /// Minimum std/mean ratio of the energy envelope for sound to count as present
    pub relative_threshold: f64,

    /// Minimum separation between accepted peaks, in windows
    pub min_peak_distance: usize,

    /// Lower bound of the pulsatile band, inclusive
    pub bpm_min: f64,

    /// Upper bound of the pulsatile band, inclusive
    pub bpm_max: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_ms: 50,
            relative_threshold: 0.5,
            min_peak_distance: 7, // ~350ms at 50ms windows
            bpm_min: 40.0,
            bpm_max: 180.0,
        }
    }
}

impl DetectorConfig {
    /// Window duration in seconds
    pub fn window_seconds(&self) -> f64 {
        self.window_ms as f64 / 1000.0
    }

    /// Samples per analysis window at `sample_rate`.
    ///
    /// Integer arithmetic keeps `floor(sample_rate * window)` exact for
    /// rates such as 44100 Hz where the float product is not.
    pub fn chunk_size(&self, sample_rate: u32) -> usize {
        (sample_rate as u64 * self.window_ms as u64 / 1000) as usize
    }

    /// Whether `bpm` lies in the pulsatile band
    pub fn is_pulsatile_rate(&self, bpm: f64) -> bool {
        (self.bpm_min..=self.bpm_max).contains(&bpm)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "detector.window_ms".to_string(),
                value: self.window_ms.to_string()
            }.into());
        }

        if !self.relative_threshold.is_finite() || self.relative_threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "detector.relative_threshold".to_string(),
                value: self.relative_threshold.to_string()
            }.into());
        }

        if self.min_peak_distance == 0 {
            return Err(ConfigError::InvalidValue {
                key: "detector.min_peak_distance".to_string(),
                value: self.min_peak_distance.to_string()
            }.into());
        }

        if !(self.bpm_min > 0.0) || !self.bpm_max.is_finite() || self.bpm_min > self.bpm_max {
            return Err(ConfigError::InvalidValue {
                key: "detector.bpm_range".to_string(),
                value: format!("{}-{}", self.bpm_min, self.bpm_max)
            }.into());
        }

        Ok(())
    }
}

/// Expected shape of a capture from the recording host.
///
/// Only used to warn about unusual inputs; analysis never rejects a
/// recording for mismatching these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Sample rate the recorder captures at (Hz)
    pub sample_rate: u32,

    /// Fixed capture duration in seconds
    pub duration_seconds: f64,

    /// Allowed deviation from `duration_seconds` before warning
    pub duration_tolerance_seconds: f64,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            duration_seconds: 30.0,
            duration_tolerance_seconds: 1.0,
        }
    }
}

impl RecordingConfig {
    fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidValue {
                key: "recording.sample_rate".to_string(),
                value: self.sample_rate.to_string()
            }.into());
        }

        if !(self.duration_seconds > 0.0) || !(self.duration_tolerance_seconds >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "recording.duration".to_string(),
                value: format!("{}±{}", self.duration_seconds, self.duration_tolerance_seconds)
            }.into());
        }

        Ok(())
    }

    /// Describe how a capture deviates from the expected recording, if at all
    pub fn mismatches(&self, sample_rate: u32, duration_seconds: f64) -> Vec<String> {
        let mut issues = Vec::new();

        if sample_rate != self.sample_rate {
            issues.push(format!(
                "sample rate {} Hz differs from expected {} Hz",
                sample_rate, self.sample_rate
            ));
        }

        if (duration_seconds - self.duration_seconds).abs() > self.duration_tolerance_seconds {
            issues.push(format!(
                "duration {:.2}s differs from expected {:.2}s",
                duration_seconds, self.duration_seconds
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.detector.min_peak_distance = 9;
        original_config.detector.bpm_max = 150.0;

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[detector]\nrelative_threshold = 0.8\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.detector.relative_threshold, 0.8);
        assert_eq!(config.detector.window_ms, 50);
        assert_eq!(config.recording, RecordingConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/definitely/not/here.toml");
        assert!(matches!(
            result,
            Err(crate::error::PulseError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_invalid_window() {
        let mut config = Config::default();
        config.detector.window_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_bpm_range() {
        let mut config = Config::default();
        config.detector.bpm_min = 150.0;
        config.detector.bpm_max = 100.0;
        assert!(config.validate().is_err());

        config.detector.bpm_min = 0.0;
        config.detector.bpm_max = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_peak_distance_rejected() {
        let mut config = Config::default();
        config.detector.min_peak_distance = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_chunk_size_is_exact() {
        let detector = DetectorConfig::default();
        assert_eq!(detector.chunk_size(48000), 2400);
        assert_eq!(detector.chunk_size(44100), 2205);
        assert_eq!(detector.chunk_size(10), 0);
    }

    #[test]
    fn test_pulsatile_band_is_inclusive() {
        let detector = DetectorConfig::default();
        assert!(detector.is_pulsatile_rate(40.0));
        assert!(detector.is_pulsatile_rate(180.0));
        assert!(!detector.is_pulsatile_rate(39.999));
        assert!(!detector.is_pulsatile_rate(180.001));
    }

    #[test]
    fn test_recording_mismatches() {
        let recording = RecordingConfig::default();
        assert!(recording.mismatches(48000, 30.4).is_empty());

        let issues = recording.mismatches(44100, 12.0);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("44100"));
    }
}
