//! Decoded PCM sample buffer

use crate::error::AnalysisError;

/// Immutable decoded PCM audio: per-channel float samples at a known
/// sample rate.
///
/// Produced once by the decoding front-end (or a test generator) and then
/// only read; both detectors borrow it concurrently without
/// synchronization. Channels always have equal length, validated at
/// construction.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from per-channel sample vectors.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] for a zero sample rate, no
    /// channels, or channels of differing length. Empty channels are
    /// allowed: a zero-length buffer is valid input that analyzes to a
    /// zero-confidence result.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "sample rate must be > 0".to_string(),
            ));
        }
        if channels.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "at least one channel required".to_string(),
            ));
        }
        let len = channels[0].len();
        if channels.iter().any(|c| c.len() != len) {
            return Err(AnalysisError::InvalidInput(
                "all channels must have the same length".to_string(),
            ));
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a mono buffer.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AnalysisError> {
        Self::new(vec![samples], sample_rate)
    }

    /// Create a buffer from interleaved samples (decoder output layout).
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] if `channel_count` is zero
    /// or the sample count is not a multiple of it.
    pub fn from_interleaved(
        samples: &[f32],
        channel_count: usize,
        sample_rate: u32,
    ) -> Result<Self, AnalysisError> {
        if channel_count == 0 {
            return Err(AnalysisError::InvalidInput(
                "channel count must be > 0".to_string(),
            ));
        }
        if samples.len() % channel_count != 0 {
            return Err(AnalysisError::InvalidInput(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channel_count
            )));
        }
        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame.iter()) {
                channel.push(sample);
            }
        }
        Self::new(channels, sample_rate)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn samples_per_channel(&self) -> usize {
        self.channels[0].len()
    }

    /// Duration in seconds (`samples_per_channel / sample_rate`).
    pub fn duration_seconds(&self) -> f32 {
        self.samples_per_channel() as f32 / self.sample_rate as f32
    }

    /// Borrow one channel's samples.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Average all channels into a mono signal.
    ///
    /// Single-channel buffers are copied as-is. Both detectors analyze the
    /// same downmix, computed once per analysis pass.
    pub fn downmix_mono(&self) -> Vec<f32> {
        if self.channels.len() == 1 {
            return self.channels[0].clone();
        }
        let scale = 1.0 / self.channels.len() as f32;
        (0..self.samples_per_channel())
            .map(|i| self.channels.iter().map(|c| c[i]).sum::<f32>() * scale)
            .collect()
    }
}
