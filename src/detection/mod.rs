//! # Detection Module
//!
//! Decides whether a fixed-length capture contains sound events and, if it
//! does, whether they recur at a pulsatile (heartbeat-like) rate.
//!
//! ## Pipeline
//!
//! 1. **Normalize** the samples to a unit peak
//! 2. **Window** into fixed, non-overlapping chunks (50ms by default)
//! 3. **Estimate energy** as RMS per chunk, giving the energy envelope
//! 4. **Detect presence** from the envelope's std/mean ratio
//! 5. **Pick peaks** above `mean + std`, separated by a minimum distance
//! 6. **Classify** the inter-peak rate against the pulsatile band
//!
//! ## Usage
//!
//! ```rust
//! use pulse_classifier::detection::{ClassificationResult, PulseAnalyzer};
//!
//! let samples = vec![0.0f32; 48000];
//! let result = PulseAnalyzer::new().analyze(&samples, 48000);
//! assert!(matches!(result, ClassificationResult::AnalysisError(_)));
//! ```

pub mod analyzer;
pub mod buffer;
pub mod envelope;
pub mod normalize;
pub mod peaks;
pub mod presence;
pub mod rate;
pub mod types;

pub use analyzer::PulseAnalyzer;
pub use buffer::SampleBuffer;
pub use presence::EnvelopeStats;
pub use rate::{Pulsatility, RateEstimate};
pub use types::{AnalysisReport, ClassificationResult};
