//! # Cadence DSP
//!
//! An audio analysis engine producing playback metadata for media tools:
//! tempo (beats-per-minute) estimation and musical key estimation with
//! Camelot wheel notation.
//!
//! ## Features
//!
//! - **Transform engine**: iterative radix-2 FFT with per-size cached
//!   plans (twiddle factors + bit-reversal permutations) and Hann/Hamming
//!   windows
//! - **Tempo detection**: spectral-flux onset envelope, autocorrelation
//!   periodicity search, octave correction into a 60-200 BPM range
//! - **Key detection**: chromagram extraction with pitch-class folding,
//!   Krumhansl-Schmuckler profile correlation, Camelot output
//!
//! ## Quick start
//!
//! ```no_run
//! use cadence_dsp::{analyze_audio, AnalysisConfig};
//!
//! // Decoded mono samples, normalized to [-1.0, 1.0]
//! let samples: Vec<f32> = vec![];
//! let result = analyze_audio(&samples, 44100, &AnalysisConfig::default())?;
//!
//! println!("BPM: {:.1} (confidence {:.2})", result.tempo.bpm, result.tempo.confidence);
//! println!("Key: {} ({})", result.key.name(), result.key.camelot);
//! # Ok::<(), cadence_dsp::AnalysisError>(())
//! ```
//!
//! ## Design
//!
//! Both detectors are pure, stateless-per-call functions over the
//! immutable input; they run concurrently on a shared [`TransformEngine`]
//! whose plan cache is the only shared mutable state. Degenerate input
//! (silence, steady tones, too-short buffers) produces zero-confidence
//! estimates rather than errors: "tempo/key unknown" is a result, not a
//! failure.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod transform;

pub use analysis::result::{AnalysisMetadata, AnalysisResult};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::key::{KeyEstimate, Mode};
pub use features::period::TempoEstimate;
pub use io::SampleBuffer;
pub use transform::TransformEngine;

use std::time::Instant;

/// Analyze a mono signal.
///
/// Runs tempo and key detection concurrently over the same samples and
/// returns the combined result. Each call is independent and side-effect
/// free; the transform plan cache lives and dies with the call.
///
/// # Arguments
///
/// * `samples` - Mono samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Analysis parameters; `AnalysisConfig::default()` for the
///   standard setup
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] for a zero sample rate and
/// [`AnalysisError::Configuration`] for invalid frame/hop/range settings.
/// Short or silent input is not an error and yields zero-confidence
/// estimates.
pub fn analyze_audio(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let start_time = Instant::now();

    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "sample rate must be > 0".to_string(),
        ));
    }
    config.validate()?;

    log::debug!(
        "starting analysis: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let engine = TransformEngine::new();
    let (tempo, key) = rayon::join(
        || features::period::detect_tempo(&engine, samples, sample_rate, config),
        || features::key::detect_key(&engine, samples, sample_rate, config),
    );
    let tempo = tempo?;
    let key = key?;

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!(
        "analysis finished in {:.2} ms: {:.2} BPM, {}",
        processing_time_ms,
        tempo.bpm,
        key.name()
    );

    Ok(AnalysisResult {
        tempo,
        key,
        metadata: AnalysisMetadata {
            duration_seconds: samples.len() as f32 / sample_rate as f32,
            sample_rate,
            processing_time_ms,
        },
    })
}

/// Analyze a (possibly multi-channel) sample buffer.
///
/// Downmixes to mono by channel averaging, then runs [`analyze_audio`].
///
/// # Errors
///
/// Same conditions as [`analyze_audio`].
pub fn analyze_buffer(
    buffer: &SampleBuffer,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let mono = buffer.downmix_mono();
    analyze_audio(&mono, buffer.sample_rate(), config)
}
