//! Frequency-domain transform engine
//!
//! Converts time-domain sample blocks into complex frequency bins in
//! O(N log N) using an iterative radix-2 decimation-in-time algorithm.
//! The direct O(N²) summation this replaces is unusable at analysis frame
//! sizes (8192-point frames over a full track).
//!
//! Per-size [`TransformPlan`]s (twiddle factors + bit-reversal permutation)
//! are cached inside the engine, keyed by transform size. The cache is the
//! only shared mutable state in the engine; plans are immutable once built,
//! so concurrent readers never race a write and the insert race is resolved
//! first-writer-wins under the lock.

pub mod plan;
pub mod window;

pub use plan::TransformPlan;
pub use window::{build_window, Window};

use crate::error::AnalysisError;
use num_complex::Complex;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Complex-valued output of one block transform.
///
/// Holds the N frequency bins; magnitudes and bin frequencies are derived
/// on demand rather than stored.
#[derive(Debug, Clone)]
pub struct SpectralFrame {
    bins: Vec<Complex<f32>>,
}

impl SpectralFrame {
    /// All N complex bins.
    pub fn bins(&self) -> &[Complex<f32>] {
        &self.bins
    }

    /// Number of bins (the transform size).
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True if the frame holds no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Magnitude of bin `k`.
    pub fn magnitude(&self, k: usize) -> f32 {
        self.bins[k].norm()
    }

    /// Magnitudes of all N bins.
    pub fn magnitudes(&self) -> Vec<f32> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// Center frequency of bin `k` in Hz for the given sample rate.
    pub fn bin_frequency(&self, k: usize, sample_rate: u32) -> f32 {
        bin_frequency(k, self.bins.len(), sample_rate)
    }
}

/// Center frequency in Hz of bin `k` of an `size`-point transform at
/// `sample_rate`.
pub fn bin_frequency(k: usize, size: usize, sample_rate: u32) -> f32 {
    if size == 0 {
        return 0.0;
    }
    k as f32 * sample_rate as f32 / size as f32
}

/// Transform engine with a size-keyed plan cache.
///
/// One engine is created per analysis pass and shared (by reference) between
/// the concurrently running detectors; each distinct frame size pays the
/// plan-construction cost once.
#[derive(Debug, Default)]
pub struct TransformEngine {
    plans: RwLock<HashMap<usize, Arc<TransformPlan>>>,
}

impl TransformEngine {
    /// Create an engine with an empty plan cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or build the plan for an `size`-point transform.
    ///
    /// Requesting the same size twice returns the same cached plan. The
    /// read path takes only the shared lock; the write lock is held just
    /// for a losing-racer re-check and insert.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] if `size` is zero or not a
    /// power of two. Callers are expected to pad to a power of two
    /// explicitly; the engine never pads silently.
    pub fn plan(&self, size: usize) -> Result<Arc<TransformPlan>, AnalysisError> {
        if !size.is_power_of_two() {
            return Err(AnalysisError::Configuration(format!(
                "transform size must be a power of two, got {}",
                size
            )));
        }

        {
            let plans = self.plans.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(plan) = plans.get(&size) {
                return Ok(Arc::clone(plan));
            }
        }

        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        let plan = plans
            .entry(size)
            .or_insert_with(|| {
                log::debug!("building transform plan for size {}", size);
                Arc::new(TransformPlan::new(size))
            });
        Ok(Arc::clone(plan))
    }

    /// Forward transform of a complex block. The block length must be a
    /// power of two.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] for non-power-of-two input
    /// lengths.
    pub fn forward(&self, mut bins: Vec<Complex<f32>>) -> Result<SpectralFrame, AnalysisError> {
        let plan = self.plan(bins.len())?;
        plan.process(&mut bins);
        Ok(SpectralFrame { bins })
    }

    /// Forward transform of a real-valued block (imaginary parts zero).
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] for non-power-of-two input
    /// lengths.
    pub fn forward_real(&self, samples: &[f32]) -> Result<SpectralFrame, AnalysisError> {
        let bins: Vec<Complex<f32>> = samples.iter().map(|&x| Complex::new(x, 0.0)).collect();
        self.forward(bins)
    }

    /// Number of plans currently cached (used by tests and diagnostics).
    pub fn cached_plan_count(&self) -> usize {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
