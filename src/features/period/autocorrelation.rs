//! Autocorrelation-based periodicity estimation
//!
//! Correlates the onset envelope with lagged copies of itself over the lag
//! window implied by the BPM search range. A strongly periodic envelope
//! produces an autocorrelation peak at the beat period; the peak lag
//! converts to BPM via the envelope frame rate.
//!
//! Halving/doubling ambiguity is inherent to autocorrelation tempo
//! estimation: a 120 BPM track also correlates at 60 BPM (every other
//! beat). Two heuristics address it — exact ties prefer the smaller lag
//! (the higher tempo), and out-of-range estimates are octave-folded back
//! into the search range. Both are documented domain trade-offs, not
//! accuracy guarantees.

use super::TempoEstimate;
use crate::features::onset::OnsetEnvelope;

const EPSILON: f32 = 1e-10;

/// Estimate tempo from an onset envelope.
///
/// The envelope is mean-subtracted before correlation so that a constant
/// offset (every frame slightly noisy) does not correlate with itself at
/// every lag. Confidence is the peak autocorrelation normalized by the
/// detrended envelope energy `acf[0]`, clamped to [0, 1].
///
/// # Arguments
///
/// * `envelope` - Onset envelope from spectral flux analysis
/// * `min_bpm` / `max_bpm` - Tempo search range (e.g. 60-200)
///
/// # Returns
///
/// A [`TempoEstimate`]; the zero estimate when the envelope is empty,
/// degenerate, or has no positive correlation in the lag window.
pub fn tempo_from_envelope(
    envelope: &OnsetEnvelope,
    min_bpm: f32,
    max_bpm: f32,
) -> TempoEstimate {
    let values = envelope.values();
    let fps = envelope.frames_per_second();

    if values.len() < 2 || fps <= 0.0 || min_bpm <= 0.0 || max_bpm <= min_bpm {
        return TempoEstimate::none();
    }

    // Detrend. Without this a near-constant envelope correlates almost
    // perfectly at every lag and fabricates a confident tempo.
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    let detrended: Vec<f32> = values.iter().map(|&v| v - mean).collect();

    let energy: f32 = detrended.iter().map(|&d| d * d).sum();
    if energy <= EPSILON {
        return TempoEstimate::none();
    }

    // Lag window from the BPM range: lag = 60 * fps / bpm.
    let lag_min = ((60.0 * fps) / max_bpm).ceil() as usize;
    let lag_max = (((60.0 * fps) / min_bpm).floor() as usize).min(values.len() - 1);
    if lag_min == 0 || lag_min > lag_max {
        log::warn!(
            "unusable lag window [{}, {}] for {} envelope frames",
            lag_min,
            lag_max,
            values.len()
        );
        return TempoEstimate::none();
    }

    // Direct correlation over the window. The window spans a few dozen
    // lags, so this stays cheap; the transform engine is reserved for the
    // per-frame spectra.
    let mut best_lag = 0usize;
    let mut best_value = 0.0f32;
    for lag in lag_min..=lag_max {
        let mut acc = 0.0f32;
        for i in 0..(detrended.len() - lag) {
            acc += detrended[i] * detrended[i + lag];
        }
        // Strict `>` keeps the first (smallest) lag on exact ties,
        // preferring the higher tempo.
        if acc > best_value {
            best_value = acc;
            best_lag = lag;
        }
    }

    if best_lag == 0 || best_value <= 0.0 {
        return TempoEstimate::none();
    }

    let raw_bpm = 60.0 * fps / best_lag as f32;
    let bpm = fold_into_range(raw_bpm, min_bpm, max_bpm);
    let confidence = (best_value / energy).clamp(0.0, 1.0);

    TempoEstimate { bpm, confidence }
}

/// Octave-correct a BPM value into `[min_bpm, max_bpm]` by doubling or
/// halving. Returns the input unchanged when the range cannot contain any
/// octave of it (possible when the range spans less than a factor of two).
pub fn fold_into_range(bpm: f32, min_bpm: f32, max_bpm: f32) -> f32 {
    if bpm <= 0.0 || min_bpm <= 0.0 || max_bpm <= min_bpm {
        return bpm;
    }
    let mut folded = bpm;
    let mut steps = 0;
    while folded < min_bpm && steps < 8 {
        folded *= 2.0;
        steps += 1;
    }
    while folded > max_bpm && steps < 8 {
        folded /= 2.0;
        steps += 1;
    }
    if folded < min_bpm || folded > max_bpm {
        log::warn!(
            "BPM {:.2} cannot be octave-folded into [{:.1}, {:.1}]",
            bpm,
            min_bpm,
            max_bpm
        );
        return bpm;
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::onset::OnsetEnvelope;

    /// Envelope with a unit spike every `period` frames.
    fn spiky_envelope(period: usize, frames: usize, fps: f32) -> OnsetEnvelope {
        let mut values = vec![0.0f32; frames];
        let mut i = 0;
        while i < frames {
            values[i] = 1.0;
            i += period;
        }
        OnsetEnvelope::new(values, fps)
    }

    #[test]
    fn test_periodic_envelope_recovers_bpm() {
        // 86.13 fps (44.1 kHz / 512 hop); spikes every 43 frames ≈ 120 BPM
        let fps = 44100.0 / 512.0;
        let envelope = spiky_envelope(43, 860, fps);
        let estimate = tempo_from_envelope(&envelope, 60.0, 200.0);

        assert!(
            (estimate.bpm - 120.0).abs() < 2.0,
            "expected ~120 BPM, got {:.2}",
            estimate.bpm
        );
        assert!(estimate.confidence > 0.1, "confidence {}", estimate.confidence);
    }

    #[test]
    fn test_prefers_fundamental_over_double_period() {
        // Spikes every 40 frames also correlate at lag 80; the true period
        // must win because it has more aligned terms.
        let fps = 86.0;
        let envelope = spiky_envelope(40, 800, fps);
        let estimate = tempo_from_envelope(&envelope, 60.0, 200.0);
        let expected = 60.0 * fps / 40.0; // 129 BPM
        assert!(
            (estimate.bpm - expected).abs() < 3.0,
            "expected ~{:.1} BPM, got {:.2}",
            expected,
            estimate.bpm
        );
    }

    #[test]
    fn test_empty_envelope_returns_none() {
        let envelope = OnsetEnvelope::new(Vec::new(), 86.0);
        assert_eq!(tempo_from_envelope(&envelope, 60.0, 200.0), TempoEstimate::none());
    }

    #[test]
    fn test_constant_envelope_returns_none() {
        // Constant novelty has zero variance after detrending: no rhythm.
        let envelope = OnsetEnvelope::new(vec![0.7f32; 500], 86.0);
        let estimate = tempo_from_envelope(&envelope, 60.0, 200.0);
        assert_eq!(estimate.bpm, 0.0);
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_all_zero_envelope_returns_none() {
        let envelope = OnsetEnvelope::new(vec![0.0f32; 500], 86.0);
        assert_eq!(tempo_from_envelope(&envelope, 60.0, 200.0), TempoEstimate::none());
    }

    #[test]
    fn test_envelope_shorter_than_lag_window() {
        // 10 frames cannot host a 60 BPM lag at 86 fps (lag 86).
        let envelope = spiky_envelope(3, 10, 86.0);
        let estimate = tempo_from_envelope(&envelope, 60.0, 200.0);
        assert_eq!(estimate, TempoEstimate::none());
    }

    #[test]
    fn test_fold_into_range() {
        assert_eq!(fold_into_range(240.0, 60.0, 200.0), 120.0);
        assert_eq!(fold_into_range(40.0, 60.0, 200.0), 80.0);
        assert_eq!(fold_into_range(500.0, 60.0, 200.0), 125.0);
        assert_eq!(fold_into_range(120.0, 60.0, 200.0), 120.0);
        // Boundary values stay put
        assert_eq!(fold_into_range(60.0, 60.0, 200.0), 60.0);
        assert_eq!(fold_into_range(200.0, 60.0, 200.0), 200.0);
    }

    #[test]
    fn test_fold_degenerate_inputs() {
        assert_eq!(fold_into_range(0.0, 60.0, 200.0), 0.0);
        assert_eq!(fold_into_range(120.0, 200.0, 60.0), 120.0);
        // Range narrower than an octave may not contain any fold
        let out = fold_into_range(500.0, 90.0, 100.0);
        assert_eq!(out, 500.0);
    }
}
