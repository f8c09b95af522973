//! Error types for the audio analysis engine

use thiserror::Error;

/// Errors that can occur during audio analysis.
///
/// Degenerate-but-valid inputs (silence, constant signals, buffers shorter
/// than one analysis frame) are deliberately *not* errors: the detectors
/// return zero-confidence estimates for them, since "no confident estimate"
/// is a legitimate analysis outcome. Errors are reserved for malformed
/// inputs and internal invariant violations.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// Invalid input parameters (bad buffer geometry, zero sample rate)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal invariant violation (non-power-of-two transform size,
    /// zero hop). These are programming errors and fail fast rather than
    /// being papered over with silent padding.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Audio decoding error from the file front-end
    #[error("decode error: {0}")]
    Decode(String),
}
