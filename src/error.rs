use serde::Serialize;
use thiserror::Error;

/// Main error type for the pulse-classifier library
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Audio input error: {0}")]
    Audio(#[from] AudioError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the detection pipeline itself
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("Invalid input: {details}")]
    InvalidInput { details: String },

    #[error("Division undefined: {quantity} is zero")]
    DivisionUndefined { quantity: String },

    #[error("Insufficient peaks: found {found}, need at least 2 to estimate a rate")]
    InsufficientPeaks { found: usize },
}

impl AnalysisError {
    pub(crate) fn invalid_input<S: Into<String>>(details: S) -> Self {
        Self::InvalidInput { details: details.into() }
    }

    pub(crate) fn division_undefined<S: Into<String>>(quantity: S) -> Self {
        Self::DivisionUndefined { quantity: quantity.into() }
    }

    /// Degenerate energy statistics: the capture is inconclusive rather than broken.
    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Self::DivisionUndefined { quantity } if quantity == MEAN_ENERGY)
    }
}

/// Quantity name used when the envelope has zero mean energy
pub(crate) const MEAN_ENERGY: &str = "mean RMS energy";

/// Quantity name used when consecutive peaks coincide
pub(crate) const AVERAGE_INTERVAL: &str = "average peak interval";

/// Audio-input errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed { path: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid audio parameters: {details}")]
    InvalidParameters { details: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using PulseError
pub type Result<T> = std::result::Result<T, PulseError>;

impl PulseError {
    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Audio(AudioError::LoadFailed { .. }) => true,
            // Sound was present but too sparse; a new recording may succeed
            Self::Analysis(AnalysisError::InsufficientPeaks { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Analysis(AnalysisError::InvalidInput { details }) => {
                format!("The recording cannot be analyzed ({}). Please record again.", details)
            }
            Self::Analysis(AnalysisError::InsufficientPeaks { found }) => {
                format!(
                    "Sound was detected but only {} event(s) were found, so no rate could be estimated. Please record again.",
                    found
                )
            }
            Self::Audio(AudioError::LoadFailed { path }) => {
                format!("Could not load audio file '{}'. Please check the file exists and is a WAV file.", path)
            }
            Self::Audio(AudioError::UnsupportedFormat { format }) => {
                format!("Unsupported audio format '{}'. Only WAV files are supported.", format)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
