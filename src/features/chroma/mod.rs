//! Chromagram extraction
//!
//! Folds the magnitude spectrum into 12 pitch-class bins (C through B),
//! octave-independent, accumulated across all analysis frames.

pub mod extractor;

pub use extractor::{extract_chromagram, pitch_class_of_frequency};

/// Number of pitch classes in the equal-tempered scale.
pub const PITCH_CLASSES: usize = 12;

/// 12-bin pitch-class energy distribution.
///
/// Normalized to sum to 1 when any energy was accumulated; all-zero for
/// silent or too-short input. Index 0 is C, index 11 is B.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromagram {
    energies: [f32; PITCH_CLASSES],
}

impl Chromagram {
    /// Build a chromagram from raw accumulated energies, normalizing to
    /// unit sum. Zero input stays zero rather than dividing by zero.
    pub fn from_energies(mut energies: [f32; PITCH_CLASSES]) -> Self {
        let total: f32 = energies.iter().sum();
        if total > 0.0 {
            for e in &mut energies {
                *e /= total;
            }
        }
        Self { energies }
    }

    /// The all-zero chromagram (no pitch content observed).
    pub fn silent() -> Self {
        Self {
            energies: [0.0; PITCH_CLASSES],
        }
    }

    /// Normalized energy per pitch class, C first.
    pub fn energies(&self) -> &[f32; PITCH_CLASSES] {
        &self.energies
    }

    /// Energy of one pitch class (0 = C .. 11 = B).
    pub fn energy(&self, pitch_class: usize) -> f32 {
        self.energies[pitch_class % PITCH_CLASSES]
    }

    /// True if no pitch content was observed.
    pub fn is_silent(&self) -> bool {
        self.energies.iter().all(|&e| e == 0.0)
    }
}
