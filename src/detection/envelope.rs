use std::slice::ChunksExact;

use crate::error::AnalysisError;

/// Split `signal` into contiguous, non-overlapping windows of `chunk_size`.
///
/// The trailing partial window is dropped, never zero-padded.
pub fn windows(signal: &[f32], chunk_size: usize) -> Result<ChunksExact<'_, f32>, AnalysisError> {
    if chunk_size < 1 {
        return Err(AnalysisError::invalid_input("analysis window holds no samples"));
    }

    if signal.len() / chunk_size == 0 {
        return Err(AnalysisError::invalid_input(format!(
            "signal of {} samples is shorter than one window of {}",
            signal.len(),
            chunk_size
        )));
    }

    Ok(signal.chunks_exact(chunk_size))
}

/// Root-mean-square energy of one window
pub fn rms(chunk: &[f32]) -> f32 {
    if chunk.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = chunk
        .iter()
        .map(|&s| {
            let magnitude = s.abs() as f64;
            magnitude * magnitude
        })
        .sum();

    (sum_sq / chunk.len() as f64).sqrt() as f32
}

/// Per-window RMS energy in temporal order
pub fn energy_envelope(signal: &[f32], chunk_size: usize) -> Result<Vec<f32>, AnalysisError> {
    let envelope: Vec<f32> = windows(signal, chunk_size)?.map(rms).collect();

    tracing::debug!(
        "Energy envelope: {} windows of {} samples ({} trailing samples dropped)",
        envelope.len(),
        chunk_size,
        signal.len() % chunk_size
    );

    Ok(envelope)
}
