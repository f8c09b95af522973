//! Tempo estimation
//!
//! Converts the onset envelope into a beats-per-minute estimate:
//! autocorrelation over the lag window implied by the BPM search range,
//! peak picking with a smallest-lag tie-break, and octave correction.

pub mod autocorrelation;

pub use autocorrelation::tempo_from_envelope;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::onset;
use crate::transform::TransformEngine;
use serde::{Deserialize, Serialize};

/// Tempo estimate in beats per minute with a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoEstimate {
    /// Estimated tempo in BPM, octave-corrected into the configured search
    /// range. 0.0 when no periodic onset structure was found.
    pub bpm: f32,

    /// Confidence in [0, 1]: autocorrelation peak height relative to the
    /// envelope's total (detrended) energy. 0.0 for silent, constant or
    /// too-short input.
    pub confidence: f32,
}

impl TempoEstimate {
    /// The defined fallback for input with no usable onset structure.
    pub fn none() -> Self {
        Self {
            bpm: 0.0,
            confidence: 0.0,
        }
    }
}

/// Estimate the tempo of a mono signal.
///
/// Builds the spectral-flux onset envelope, then finds the dominant
/// periodicity by autocorrelation. Pure function of the input and config;
/// no state survives the call.
///
/// # Errors
///
/// Returns [`AnalysisError::Configuration`] for invalid frame/hop sizes.
/// Degenerate signals are not errors: they produce
/// `TempoEstimate { bpm: 0.0, confidence: 0.0 }`.
pub fn detect_tempo(
    engine: &TransformEngine,
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<TempoEstimate, AnalysisError> {
    log::debug!(
        "tempo detection: {} samples at {} Hz, frame {}, hop {}",
        samples.len(),
        sample_rate,
        config.tempo_frame_size,
        config.tempo_hop_size
    );

    let envelope = onset::onset_envelope(
        engine,
        samples,
        sample_rate,
        config.tempo_frame_size,
        config.tempo_hop_size,
    )?;

    let estimate = tempo_from_envelope(&envelope, config.min_bpm, config.max_bpm);
    log::debug!(
        "tempo estimate: {:.2} BPM (confidence {:.3})",
        estimate.bpm,
        estimate.confidence
    );
    Ok(estimate)
}
