//! Chromagram extraction from windowed spectra
//!
//! Each analysis frame is Hanning-windowed and transformed; every magnitude
//! bin whose center frequency lies inside the musical pitch band is folded
//! into its pitch class and accumulated. Key detection uses a larger frame
//! than tempo detection because adjacent semitones in the low octaves are
//! only a few Hz apart (C2 = 65.4 Hz vs C#2 = 69.3 Hz) and need the finer
//! bin spacing.

use super::{Chromagram, PITCH_CLASSES};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::transform::{bin_frequency, build_window, TransformEngine, Window};

/// Frequency of C0 in Hz under A4 = 440 equal temperament. The anchor for
/// pitch-class folding: `round(12 * log2(f / C0)) mod 12` lands C on 0.
pub const REFERENCE_C0_HZ: f32 = 16.351_598;

/// Pitch class (0 = C .. 11 = B) of a frequency in Hz, 12-TET, A4 = 440.
///
/// Returns `None` for non-positive frequencies, which have no pitch.
pub fn pitch_class_of_frequency(frequency: f32) -> Option<usize> {
    if frequency <= 0.0 {
        return None;
    }
    let semitones = 12.0 * (frequency / REFERENCE_C0_HZ).log2();
    Some((semitones.round() as i64).rem_euclid(12) as usize)
}

/// Extract the chromagram of a mono signal.
///
/// # Arguments
///
/// * `engine` - Shared transform engine
/// * `samples` - Mono samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Supplies `key_frame_size`, `key_hop_size` and the
///   [`min_pitch_hz`, `max_pitch_hz`] band
///
/// # Returns
///
/// A [`Chromagram`] normalized to unit sum, or the silent chromagram when
/// the input is shorter than one frame or carries no energy inside the
/// pitch band.
///
/// # Errors
///
/// Returns [`AnalysisError::Configuration`] if the frame size is not a
/// power of two or the hop is zero.
pub fn extract_chromagram(
    engine: &TransformEngine,
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<Chromagram, AnalysisError> {
    let frame_size = config.key_frame_size;
    let hop_size = config.key_hop_size;

    if hop_size == 0 {
        return Err(AnalysisError::Configuration(
            "hop size must be > 0".to_string(),
        ));
    }
    engine.plan(frame_size)?;

    if samples.len() < frame_size {
        log::debug!(
            "input too short for chroma analysis: {} samples < frame {}",
            samples.len(),
            frame_size
        );
        return Ok(Chromagram::silent());
    }

    // Precompute the bin → pitch-class map once; it only depends on the
    // frame geometry. Bins outside the pitch band fold to None: below it
    // is sub-bass rumble, above it harmonics dominate over fundamentals.
    let spectrum_bins = frame_size / 2 + 1;
    let bin_pitch_class: Vec<Option<usize>> = (0..spectrum_bins)
        .map(|k| {
            let freq = bin_frequency(k, frame_size, sample_rate);
            if freq < config.min_pitch_hz || freq > config.max_pitch_hz {
                None
            } else {
                pitch_class_of_frequency(freq)
            }
        })
        .collect();

    let window = build_window(Window::Hanning, frame_size);
    let num_frames = (samples.len() - frame_size) / hop_size + 1;

    log::debug!(
        "extracting chromagram: {} frames of {} samples, hop {}",
        num_frames,
        frame_size,
        hop_size
    );

    let mut energies = [0.0f32; PITCH_CLASSES];
    for frame_idx in 0..num_frames {
        let start = frame_idx * hop_size;
        let windowed: Vec<f32> = samples[start..start + frame_size]
            .iter()
            .zip(window.iter())
            .map(|(&s, &w)| s * w)
            .collect();

        let spectrum = engine.forward_real(&windowed)?;
        for (k, pc) in bin_pitch_class.iter().enumerate() {
            if let Some(pc) = pc {
                energies[*pc] += spectrum.magnitude(k);
            }
        }
    }

    Ok(Chromagram::from_energies(energies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, sample_rate: u32, seconds: f32) -> Vec<f32> {
        let len = (sample_rate as f32 * seconds) as usize;
        (0..len)
            .map(|i| 0.6 * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_pitch_class_of_reference_notes() {
        assert_eq!(pitch_class_of_frequency(440.0), Some(9)); // A4
        assert_eq!(pitch_class_of_frequency(261.626), Some(0)); // C4
        assert_eq!(pitch_class_of_frequency(110.0), Some(9)); // A2
        assert_eq!(pitch_class_of_frequency(196.0), Some(7)); // G3
        assert_eq!(pitch_class_of_frequency(0.0), None);
        assert_eq!(pitch_class_of_frequency(-5.0), None);
    }

    #[test]
    fn test_pure_tone_dominates_its_pitch_class() {
        let engine = TransformEngine::new();
        let config = AnalysisConfig::default();
        let samples = sine(440.0, 44100, 2.0);
        let chroma = extract_chromagram(&engine, &samples, 44100, &config).unwrap();

        let best = (0..12)
            .max_by(|&a, &b| chroma.energy(a).partial_cmp(&chroma.energy(b)).unwrap())
            .unwrap();
        assert_eq!(best, 9, "A440 should land on pitch class A");
        assert!(chroma.energy(9) > 0.5, "A energy {}", chroma.energy(9));
    }

    #[test]
    fn test_chromagram_sums_to_one() {
        let engine = TransformEngine::new();
        let config = AnalysisConfig::default();
        let samples = sine(330.0, 44100, 1.0);
        let chroma = extract_chromagram(&engine, &samples, 44100, &config).unwrap();
        let sum: f32 = chroma.energies().iter().sum();
        assert!((sum - 1.0).abs() < 1e-4, "sum {}", sum);
    }

    #[test]
    fn test_sub_bass_is_excluded() {
        // Loud 30 Hz rumble (below the 55 Hz floor) mixed with a quiet A440.
        // The band filter must keep the rumble from swamping the pitch
        // distribution: A still wins despite being 18 dB quieter.
        let engine = TransformEngine::new();
        let config = AnalysisConfig::default();
        let sample_rate = 44100;
        let samples: Vec<f32> = (0..sample_rate as usize)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                0.8 * (2.0 * PI * 30.0 * t).sin() + 0.1 * (2.0 * PI * 440.0 * t).sin()
            })
            .collect();
        let chroma = extract_chromagram(&engine, &samples, sample_rate, &config).unwrap();

        let best = (0..12)
            .max_by(|&a, &b| chroma.energy(a).partial_cmp(&chroma.energy(b)).unwrap())
            .unwrap();
        assert_eq!(best, 9, "rumble should be filtered out, leaving A dominant");
    }

    #[test]
    fn test_short_input_yields_silent_chromagram() {
        let engine = TransformEngine::new();
        let config = AnalysisConfig::default();
        let chroma = extract_chromagram(&engine, &[0.1; 1000], 44100, &config).unwrap();
        assert!(chroma.is_silent());
    }

    #[test]
    fn test_silent_input_yields_silent_chromagram() {
        let engine = TransformEngine::new();
        let config = AnalysisConfig::default();
        let chroma = extract_chromagram(&engine, &vec![0.0; 44100], 44100, &config).unwrap();
        assert!(chroma.is_silent());
    }
}
