//! Key detection
//!
//! Matches the chromagram against the 24 Krumhansl-Schmuckler key profiles
//! (12 major + 12 minor rotations) and reports the best match with its
//! Camelot wheel code.

pub mod camelot;
pub mod detector;
pub mod profiles;

pub use camelot::camelot_code;
pub use detector::{detect_key, match_key_profiles};

use serde::{Deserialize, Serialize};

/// Note names per pitch class, sharps convention.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Key mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Major key
    Major,
    /// Minor key
    Minor,
}

/// Estimated musical key.
///
/// Relative major/minor pairs (e.g. C major / A minor) share most of their
/// pitch-class content and often score within a hair of each other; the
/// estimate reports the top-scoring profile without further
/// disambiguation. That ambiguity is inherent to profile matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEstimate {
    /// Tonic pitch class (0 = C .. 11 = B)
    pub pitch_class: u8,

    /// Major or minor
    pub mode: Mode,

    /// Camelot wheel code for DJ-style harmonic mixing (e.g. "8B")
    pub camelot: String,

    /// Pearson correlation of the chromagram against the winning profile,
    /// in [-1, 1]. 0.0 for silent input (the defined "no estimate" value).
    pub score: f32,
}

impl KeyEstimate {
    /// The defined fallback for input with no pitch content: C major with
    /// a zero score. Callers treat `score == 0.0` as "key unknown".
    pub fn none() -> Self {
        Self {
            pitch_class: 0,
            mode: Mode::Major,
            camelot: camelot_code(0, Mode::Major).to_string(),
            score: 0.0,
        }
    }

    /// Human-readable key name (e.g. "C", "F#m").
    pub fn name(&self) -> String {
        let note = NOTE_NAMES[self.pitch_class as usize % 12];
        match self.mode {
            Mode::Major => note.to_string(),
            Mode::Minor => format!("{}m", note),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name() {
        let mut key = KeyEstimate::none();
        assert_eq!(key.name(), "C");
        key.pitch_class = 6;
        key.mode = Mode::Minor;
        assert_eq!(key.name(), "F#m");
    }

    #[test]
    fn test_none_has_zero_score() {
        let key = KeyEstimate::none();
        assert_eq!(key.score, 0.0);
        assert_eq!(key.camelot, "8B");
    }
}
