use std::path::Path;

use crate::audio::types::AudioData;
use crate::error::{AudioError, Result};

/// WAV file loader
pub struct AudioLoader;

impl AudioLoader {
    /// Load a WAV file and return raw audio data
    pub fn load<P: AsRef<Path>>(path: P) -> Result<AudioData> {
        let path = path.as_ref();
        let extension = Self::detect_format(path).unwrap_or_default();

        if !Self::is_format_supported(&extension) {
            return Err(AudioError::UnsupportedFormat { format: extension }.into());
        }

        Self::load_wav(path)
    }

    fn load_wav(path: &Path) -> Result<AudioData> {
        let load_failed = || AudioError::LoadFailed { path: path.display().to_string() };

        let reader = hound::WavReader::open(path).map_err(|_| load_failed())?;

        let spec = reader.spec();
        let sample_rate = spec.sample_rate;
        let channels = spec.channels;

        if sample_rate == 0 || channels == 0 {
            return Err(AudioError::InvalidParameters {
                details: format!("{} Hz, {} channels", sample_rate, channels),
            }
            .into());
        }

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| load_failed())?,
            hound::SampleFormat::Int => {
                let bit_depth = spec.bits_per_sample;
                reader
                    .into_samples::<i32>()
                    .map(|sample| sample.map(|s| Self::int_to_float(s, bit_depth)))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|_| load_failed())?
            }
        };

        let duration = samples.len() as f64 / (sample_rate as f64 * channels as f64);

        tracing::debug!(
            "Loaded {}: {} Hz, {} channel(s), {}-bit, {:.2}s",
            path.display(),
            sample_rate,
            channels,
            spec.bits_per_sample,
            duration
        );

        Ok(AudioData {
            samples,
            sample_rate,
            channels,
            duration,
            bit_depth: Some(spec.bits_per_sample),
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Convert integer sample to float (-1.0 to 1.0)
    fn int_to_float(sample: i32, bit_depth: u16) -> f32 {
        match bit_depth {
            8 => sample as f32 / 128.0,
            16 => sample as f32 / 32768.0,
            24 => sample as f32 / 8388608.0,
            32 => sample as f32 / 2147483648.0,
            _ => sample as f32 / 32768.0, // Default to 16-bit
        }
    }

    /// Detect audio format from file extension
    pub fn detect_format<P: AsRef<Path>>(path: P) -> Option<String> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Check if a file format is supported
    pub fn is_format_supported(extension: &str) -> bool {
        matches!(extension.to_lowercase().as_str(), "wav" | "wave")
    }
}
