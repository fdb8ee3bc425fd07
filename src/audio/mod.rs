//! # Audio Input Module
//!
//! Loads finished captures from WAV files so they can be handed to the
//! detection pipeline. Capture itself is owned by the recording host.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pulse_classifier::audio::AudioLoader;
//! use pulse_classifier::detection::PulseAnalyzer;
//!
//! # fn main() -> pulse_classifier::Result<()> {
//! let audio = AudioLoader::load("recording.wav")?;
//! let report = PulseAnalyzer::new().analyze_audio(&audio);
//! println!("{}", report.classification);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod types;
pub use loader::AudioLoader;
pub use types::AudioData;
