//! Key detection by profile matching
//!
//! Correlates the chromagram against all 24 key profiles and reports the
//! best match. Ties between closely related keys (relative major/minor,
//! circle-of-fifths neighbors) are common; the top score wins without
//! further disambiguation.

use super::camelot::camelot_code;
use super::profiles::{profile_correlation, KRUMHANSL_MAJOR, KRUMHANSL_MINOR};
use super::{KeyEstimate, Mode};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::chroma::{extract_chromagram, Chromagram};
use crate::transform::TransformEngine;

/// Estimate the musical key of a mono signal.
///
/// Extracts the chromagram, then matches it against the 24 reference
/// profiles. Pure function of the input and config.
///
/// # Errors
///
/// Returns [`AnalysisError::Configuration`] for invalid frame/hop sizes.
/// Silent or too-short input is not an error: it yields
/// [`KeyEstimate::none`].
pub fn detect_key(
    engine: &TransformEngine,
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<KeyEstimate, AnalysisError> {
    log::debug!(
        "key detection: {} samples at {} Hz, frame {}, hop {}",
        samples.len(),
        sample_rate,
        config.key_frame_size,
        config.key_hop_size
    );

    let chromagram = extract_chromagram(engine, samples, sample_rate, config)?;
    let estimate = match_key_profiles(&chromagram);
    log::debug!(
        "key estimate: {} ({}) score {:.4}",
        estimate.name(),
        estimate.camelot,
        estimate.score
    );
    Ok(estimate)
}

/// Match a chromagram against all 24 key profiles.
///
/// Evaluation order is majors then minors, tonics ascending; a strictly
/// greater score is required to displace the current best, so exact ties
/// resolve to the earlier candidate deterministically.
pub fn match_key_profiles(chromagram: &Chromagram) -> KeyEstimate {
    if chromagram.is_silent() {
        return KeyEstimate::none();
    }

    let chroma = chromagram.energies();
    let mut best_pitch_class = 0usize;
    let mut best_mode = Mode::Major;
    let mut best_score = f32::NEG_INFINITY;

    for (mode, profile) in [
        (Mode::Major, &KRUMHANSL_MAJOR),
        (Mode::Minor, &KRUMHANSL_MINOR),
    ] {
        for tonic in 0..12 {
            let score = profile_correlation(chroma, profile, tonic);
            if score > best_score {
                best_score = score;
                best_pitch_class = tonic;
                best_mode = mode;
            }
        }
    }

    KeyEstimate {
        pitch_class: best_pitch_class as u8,
        mode: best_mode,
        camelot: camelot_code(best_pitch_class, best_mode).to_string(),
        score: best_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::chroma::Chromagram;

    /// Chromagram emphasizing the pitch classes of a triad.
    fn triad_chromagram(root: usize, third_offset: usize) -> Chromagram {
        let mut energies = [0.02f32; 12];
        energies[root] = 0.5;
        energies[(root + third_offset) % 12] = 0.3;
        energies[(root + 7) % 12] = 0.35;
        Chromagram::from_energies(energies)
    }

    #[test]
    fn test_c_major_triad_detected() {
        let chroma = triad_chromagram(0, 4);
        let estimate = match_key_profiles(&chroma);
        assert_eq!(estimate.pitch_class, 0);
        assert_eq!(estimate.mode, Mode::Major);
        assert_eq!(estimate.camelot, "8B");
        assert!(estimate.score > 0.5, "score {}", estimate.score);
    }

    #[test]
    fn test_a_minor_triad_detected() {
        let chroma = triad_chromagram(9, 3);
        let estimate = match_key_profiles(&chroma);
        assert_eq!(estimate.pitch_class, 9);
        assert_eq!(estimate.mode, Mode::Minor);
        assert_eq!(estimate.camelot, "8A");
    }

    #[test]
    fn test_transposition_moves_the_tonic() {
        for root in 0..12 {
            let estimate = match_key_profiles(&triad_chromagram(root, 4));
            assert_eq!(
                estimate.pitch_class as usize, root,
                "major triad on {} misdetected",
                root
            );
        }
    }

    #[test]
    fn test_silent_chromagram_yields_none() {
        let estimate = match_key_profiles(&Chromagram::silent());
        assert_eq!(estimate, KeyEstimate::none());
        assert_eq!(estimate.score, 0.0);
    }

    #[test]
    fn test_camelot_matches_static_table() {
        let estimate = match_key_profiles(&triad_chromagram(7, 4)); // G major
        assert_eq!(
            estimate.camelot,
            camelot_code(estimate.pitch_class as usize, estimate.mode)
        );
    }
}
