//! Onset detection
//!
//! Builds a novelty curve (onset envelope) measuring frame-to-frame
//! increase of spectral energy. The tempo detector looks for periodicity
//! in this curve.

pub mod spectral_flux;

pub use spectral_flux::onset_envelope;

/// Novelty curve over analysis frames.
///
/// One non-negative value per frame; value `i` measures the half-wave
/// rectified spectral magnitude increase from frame `i-1` to frame `i`
/// (the first frame has no predecessor and is 0). Length equals
/// `floor((sample_count - frame_size) / hop_size) + 1`, or 0 when the
/// input is shorter than one frame.
#[derive(Debug, Clone)]
pub struct OnsetEnvelope {
    values: Vec<f32>,
    frames_per_second: f32,
}

impl OnsetEnvelope {
    pub(crate) fn new(values: Vec<f32>, frames_per_second: f32) -> Self {
        debug_assert!(values.iter().all(|&v| v >= 0.0));
        Self {
            values,
            frames_per_second,
        }
    }

    /// The novelty values, one per analysis frame.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of analysis frames.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the input was too short to produce any frame.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Envelope sampling rate in frames per second
    /// (`sample_rate / hop_size`). Lags in the autocorrelation convert to
    /// periods through this rate.
    pub fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }
}
