//! Krumhansl-Schmuckler key profiles
//!
//! Canonical 12-element weight vectors describing the expected pitch-class
//! emphasis of a major and a minor key, from probe-tone experiments. Each
//! of the 24 candidate keys is the base vector circularly rotated so its
//! tonic aligns with one of the 12 pitch classes.
//!
//! # Reference
//!
//! Krumhansl, C. L. (1990). Cognitive Foundations of Musical Pitch.
//! Oxford University Press.

use crate::features::chroma::PITCH_CLASSES;

/// Major-key profile, tonic first (C major as written).
pub const KRUMHANSL_MAJOR: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Minor-key profile, tonic first (C minor as written).
pub const KRUMHANSL_MINOR: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Pearson correlation between a chromagram and a profile rotated so the
/// profile's tonic sits at pitch class `tonic`.
///
/// Rotation is done by indexing rather than copying: chromagram position
/// `(tonic + i) mod 12` pairs with profile position `i`.
///
/// Returns 0.0 when either vector has zero variance (silent or constant
/// input), which would otherwise divide by zero.
pub fn profile_correlation(chroma: &[f32; PITCH_CLASSES], profile: &[f32; 12], tonic: usize) -> f32 {
    let n = PITCH_CLASSES as f32;
    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    let mut sum_xy = 0.0f32;
    let mut sum_x2 = 0.0f32;
    let mut sum_y2 = 0.0f32;

    for i in 0..PITCH_CLASSES {
        let x = chroma[(tonic + i) % PITCH_CLASSES];
        let y = profile[i];
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator < 1e-10 {
        0.0
    } else {
        numerator / denominator
    }
}
