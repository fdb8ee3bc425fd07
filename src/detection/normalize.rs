use crate::error::AnalysisError;

/// Peak-normalize `samples` into [-1, 1].
///
/// Fails on an empty buffer, on any non-finite sample, and on pure silence
/// (maximum absolute value of zero).
pub fn normalize(samples: &[f32]) -> Result<Vec<f32>, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::invalid_input("empty audio samples"));
    }

    if let Some(position) = samples.iter().position(|s| !s.is_finite()) {
        return Err(AnalysisError::invalid_input(format!(
            "non-finite sample at index {}",
            position
        )));
    }

    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    if peak == 0.0 {
        return Err(AnalysisError::invalid_input("signal is entirely silent"));
    }

    tracing::debug!("Normalizing {} samples by peak {:.6}", samples.len(), peak);
    Ok(samples.iter().map(|&s| s / peak).collect())
}
