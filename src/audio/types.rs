use std::path::PathBuf;

/// Decoded audio with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Audio samples (interleaved for multichannel)
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Duration in seconds
    pub duration: f64,

    /// Bits per sample of the source file
    pub bit_depth: Option<u16>,

    /// Original file path, if loaded from disk
    pub file_path: Option<PathBuf>,
}

impl AudioData {
    /// Wrap an in-memory mono capture
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        let duration = if sample_rate > 0 {
            samples.len() as f64 / sample_rate as f64
        } else {
            0.0
        };

        Self {
            samples,
            sample_rate,
            channels: 1,
            duration,
            bit_depth: None,
            file_path: None,
        }
    }

    /// Get mono mix of all channels
    pub fn mono_samples(&self) -> Vec<f32> {
        if self.channels <= 1 {
            return self.samples.clone();
        }

        self.samples
            .chunks_exact(self.channels as usize)
            .map(|frame| frame.iter().sum::<f32>() / self.channels as f32)
            .collect()
    }

    /// Name used in logs and reports
    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string())
    }
}
