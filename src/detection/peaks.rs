//! Peak picking over the cropped energy envelope
//!
//! Local maxima follow the usual 1-D definition: a value strictly greater
//! than its left neighbour and greater than its right neighbour, with flat
//! plateaus reported at their middle index (rounding down). The first and
//! last index can never be peaks.
//!
//! Minimum separation is enforced greedily by magnitude: the largest
//! remaining candidate is accepted and every candidate closer than
//! `min_distance` indices to it is discarded. Equal magnitudes favour the
//! later index.

use super::presence::EnvelopeStats;

/// Zero every value strictly below `threshold`
pub fn crop_envelope(envelope: &[f32], threshold: f64) -> Vec<f32> {
    envelope
        .iter()
        .map(|&v| if (v as f64) < threshold { 0.0 } else { v })
        .collect()
}

/// Indices of all local maxima, in increasing order
pub fn local_maxima(signal: &[f32]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if signal.len() < 3 {
        return maxima;
    }

    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            // Walk to the end of a possible plateau
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }

            if signal[ahead] < signal[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    maxima
}

/// Keep the candidates that survive the minimum-separation constraint.
///
/// `candidates` must be strictly increasing indices into `signal`; the
/// result is too.
pub fn select_by_distance(signal: &[f32], candidates: &[usize], min_distance: usize) -> Vec<usize> {
    if min_distance <= 1 || candidates.len() < 2 {
        return candidates.to_vec();
    }

    let mut keep = vec![true; candidates.len()];

    // Stable ascending sort, walked from the top: ties go to the later index
    let mut priority: Vec<usize> = (0..candidates.len()).collect();
    priority.sort_by(|&a, &b| signal[candidates[a]].total_cmp(&signal[candidates[b]]));

    for &i in priority.iter().rev() {
        if !keep[i] {
            continue;
        }

        let peak = candidates[i];

        let mut k = i;
        while k > 0 && peak - candidates[k - 1] < min_distance {
            k -= 1;
            keep[k] = false;
        }

        let mut k = i + 1;
        while k < candidates.len() && candidates[k] - peak < min_distance {
            keep[k] = false;
            k += 1;
        }
    }

    candidates
        .iter()
        .zip(keep)
        .filter_map(|(&idx, kept)| kept.then_some(idx))
        .collect()
}

/// Local maxima of `signal` at least `min_distance` indices apart
pub fn find_peaks(signal: &[f32], min_distance: usize) -> Vec<usize> {
    let candidates = local_maxima(signal);
    let peaks = select_by_distance(signal, &candidates, min_distance);

    tracing::debug!(
        "Found {} peaks from {} local maxima (min distance {})",
        peaks.len(),
        candidates.len(),
        min_distance
    );

    peaks
}

/// Threshold the envelope at `mean + std` and pick its peaks
pub fn pick_peaks(envelope: &[f32], stats: &EnvelopeStats, min_distance: usize) -> Vec<usize> {
    let threshold = stats.peak_threshold();
    let cropped = crop_envelope(envelope, threshold);

    tracing::debug!(
        "Peak threshold {:.6}: {} of {} windows retained",
        threshold,
        cropped.iter().filter(|&&v| v > 0.0).count(),
        cropped.len()
    );

    find_peaks(&cropped, min_distance)
}

/// Timestamp in seconds of each peak window
pub fn peak_times(peaks: &[usize], window_seconds: f64) -> Vec<f64> {
    peaks.iter().map(|&idx| idx as f64 * window_seconds).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crop_is_strict() {
        let cropped = crop_envelope(&[0.1, 0.5, 0.49, 0.9], 0.5);
        assert_eq!(cropped, vec![0.0, 0.5, 0.0, 0.9]);
    }

    #[test]
    fn test_local_maxima_basic() {
        let signal = vec![0.0, 0.5, 1.0, 0.7, 0.3, 0.9, 0.2];
        assert_eq!(local_maxima(&signal), vec![2, 5]);
    }

    #[test]
    fn test_local_maxima_excludes_edges() {
        assert!(local_maxima(&[1.0, 0.5, 0.3]).is_empty());
        assert!(local_maxima(&[0.3, 0.5, 1.0]).is_empty());
        assert!(local_maxima(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_plateau_reports_middle() {
        assert_eq!(local_maxima(&[0.0, 0.5, 0.5, 0.0, 0.0]), vec![1]);
        assert_eq!(local_maxima(&[0.0, 0.5, 0.5, 0.5, 0.0]), vec![2]);
        // Plateau running into the last index is not a peak
        assert!(local_maxima(&[0.0, 0.5, 0.5, 0.5]).is_empty());
        // Rising step, not a plateau peak
        assert!(local_maxima(&[0.0, 0.5, 0.5, 0.8]).is_empty());
    }

    #[test]
    fn test_distance_keeps_larger_peak() {
        let signal = vec![0.0, 0.5, 1.0, 0.8, 0.9, 0.3, 0.1];
        assert_eq!(find_peaks(&signal, 3), vec![2]);
        assert_eq!(find_peaks(&signal, 2), vec![2, 4]);
    }

    #[test]
    fn test_distance_tie_favours_later_index() {
        let signal = vec![0.0, 1.0, 0.0, 1.0, 0.0];
        assert_eq!(find_peaks(&signal, 3), vec![3]);
    }

    #[test]
    fn test_exact_distance_is_allowed() {
        let mut signal = vec![0.0f32; 20];
        signal[3] = 1.0;
        signal[10] = 0.5;
        assert_eq!(find_peaks(&signal, 7), vec![3, 10]);
        assert_eq!(find_peaks(&signal, 8), vec![3]);
    }

    #[test]
    fn test_suppressed_peak_does_not_suppress_others() {
        // 5 is removed by 9; 1 is far enough from 9 to survive
        let mut signal = vec![0.0f32; 12];
        signal[1] = 0.4;
        signal[5] = 0.6;
        signal[9] = 1.0;
        assert_eq!(find_peaks(&signal, 5), vec![1, 9]);
    }

    #[test]
    fn test_pick_peaks_on_burst_envelope() {
        let mut envelope = vec![0.01f32; 60];
        for idx in [10, 25, 40] {
            envelope[idx] = 0.8;
            envelope[idx + 1] = 0.3;
        }
        let stats = EnvelopeStats::compute(&envelope).unwrap();
        assert_eq!(pick_peaks(&envelope, &stats, 7), vec![10, 25, 40]);
    }

    #[test]
    fn test_peak_times() {
        let times = peak_times(&[0, 10, 25], 0.05);
        assert_eq!(times[0], 0.0);
        assert!((times[1] - 0.5).abs() < 1e-12);
        assert!((times[2] - 1.25).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_peaks_respect_min_distance(
            signal in prop::collection::vec(0.0f32..1.0, 0..300),
            min_distance in 1usize..25,
        ) {
            let peaks = find_peaks(&signal, min_distance);
            for pair in peaks.windows(2) {
                prop_assert!(pair[1] > pair[0]);
                prop_assert!(pair[1] - pair[0] >= min_distance);
            }
        }

        #[test]
        fn prop_peaks_are_local_maxima(
            signal in prop::collection::vec(0.0f32..1.0, 0..300),
            min_distance in 1usize..25,
        ) {
            let maxima = local_maxima(&signal);
            for peak in find_peaks(&signal, min_distance) {
                prop_assert!(maxima.contains(&peak));
                prop_assert!(peak > 0 && peak + 1 < signal.len());
            }
        }
    }
}
