//! Configuration parameters for audio analysis

use crate::error::AnalysisError;

/// Analysis configuration parameters.
///
/// All values have defaults tuned for music at common sample rates
/// (44.1/48 kHz). They are centralized here so nothing is hard-coded twice,
/// but they are build-time tunables rather than an external contract:
/// callers normally use `AnalysisConfig::default()`.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // Tempo detection
    /// Minimum BPM to consider (default: 60.0)
    pub min_bpm: f32,

    /// Maximum BPM to consider (default: 200.0)
    pub max_bpm: f32,

    /// Frame size for the onset-detection STFT (default: 2048, power of two)
    pub tempo_frame_size: usize,

    /// Hop size for the onset-detection STFT (default: 512)
    pub tempo_hop_size: usize,

    // Key detection
    /// Frame size for chromagram extraction (default: 8192, power of two).
    /// Larger than the tempo frame: key detection needs finer frequency
    /// resolution to separate adjacent semitones in the low octaves.
    pub key_frame_size: usize,

    /// Hop size for chromagram extraction (default: 4096)
    pub key_hop_size: usize,

    /// Minimum frequency folded into the chromagram in Hz (default: 55.0,
    /// A1). Bins below this are sub-bass rumble, not pitch content.
    pub min_pitch_hz: f32,

    /// Maximum frequency folded into the chromagram in Hz (default: 5000.0,
    /// just above the top of the piano range).
    pub max_pitch_hz: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_bpm: 60.0,
            max_bpm: 200.0,
            tempo_frame_size: 2048,
            tempo_hop_size: 512,
            key_frame_size: 8192,
            key_hop_size: 4096,
            min_pitch_hz: 55.0,
            max_pitch_hz: 5000.0,
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration.
    ///
    /// Frame sizes must be powers of two (the transform engine rejects
    /// anything else), hops must be nonzero and no larger than their frame,
    /// and both search ranges must be properly ordered.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] on the first violated
    /// invariant.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (name, frame, hop) in [
            ("tempo", self.tempo_frame_size, self.tempo_hop_size),
            ("key", self.key_frame_size, self.key_hop_size),
        ] {
            if !frame.is_power_of_two() {
                return Err(AnalysisError::Configuration(format!(
                    "{} frame size must be a power of two, got {}",
                    name, frame
                )));
            }
            if hop == 0 || hop > frame {
                return Err(AnalysisError::Configuration(format!(
                    "{} hop size must be in 1..={}, got {}",
                    name, frame, hop
                )));
            }
        }

        if self.min_bpm <= 0.0 || self.min_bpm >= self.max_bpm {
            return Err(AnalysisError::Configuration(format!(
                "invalid BPM range: [{:.1}, {:.1}]",
                self.min_bpm, self.max_bpm
            )));
        }

        if self.min_pitch_hz <= 0.0 || self.min_pitch_hz >= self.max_pitch_hz {
            return Err(AnalysisError::Configuration(format!(
                "invalid pitch range: [{:.1}, {:.1}] Hz",
                self.min_pitch_hz, self.max_pitch_hz
            )));
        }

        Ok(())
    }
}
