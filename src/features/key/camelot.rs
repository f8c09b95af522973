//! Camelot wheel notation
//!
//! Static lookup from (pitch class, mode) to the wheel position used for
//! harmonic mixing. Minor keys take the outer ring ("A"), major keys the
//! inner ring ("B"); relative major/minor pairs share a number so
//! compatible keys are adjacent on the wheel.

use super::Mode;

/// Camelot codes for major keys, indexed by tonic pitch class (0 = C).
const CAMELOT_MAJOR: [&str; 12] = [
    "8B", "3B", "10B", "5B", "12B", "7B", "2B", "9B", "4B", "11B", "6B", "1B",
];

/// Camelot codes for minor keys, indexed by tonic pitch class (0 = C).
const CAMELOT_MINOR: [&str; 12] = [
    "5A", "12A", "7A", "2A", "9A", "4A", "11A", "6A", "1A", "8A", "3A", "10A",
];

/// Camelot wheel code for a key. Pure table lookup.
pub fn camelot_code(pitch_class: usize, mode: Mode) -> &'static str {
    match mode {
        Mode::Major => CAMELOT_MAJOR[pitch_class % 12],
        Mode::Minor => CAMELOT_MINOR[pitch_class % 12],
    }
}
