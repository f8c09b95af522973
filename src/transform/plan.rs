//! Precomputed transform plans
//!
//! A [`TransformPlan`] holds everything the radix-2 transform needs for a
//! fixed power-of-two size: the bit-reversal permutation applied before the
//! butterfly passes, and the N/2 complex roots of unity (twiddle factors)
//! the butterflies multiply by. Plans are immutable after construction and
//! are cached by the engine, so building one is a once-per-size cost.

use num_complex::Complex;
use std::f32::consts::PI;

/// Precomputed twiddle factors and bit-reversal permutation for one
/// power-of-two transform size.
///
/// Invariant: `size` is a power of two. Construction is crate-internal and
/// guarded by the engine, which rejects other sizes before a plan is built.
/// A plan is never mutated after construction and can be shared freely
/// across threads.
#[derive(Debug)]
pub struct TransformPlan {
    size: usize,
    /// Forward roots of unity: `twiddles[k] = exp(-2πik/N)` for k in 0..N/2.
    twiddles: Vec<Complex<f32>>,
    /// Permutation mapping each index to its bit-reversed counterpart.
    permutation: Vec<usize>,
}

impl TransformPlan {
    /// Build a plan for `size` points. `size` must be a power of two;
    /// the engine validates this before calling.
    pub(crate) fn new(size: usize) -> Self {
        debug_assert!(size.is_power_of_two(), "plan size must be a power of two");

        let half = size / 2;
        let mut twiddles = Vec::with_capacity(half);
        for k in 0..half {
            let angle = -2.0 * PI * k as f32 / size as f32;
            twiddles.push(Complex::new(angle.cos(), angle.sin()));
        }

        // rev[i] = rev[i >> 1] >> 1, with the dropped bit re-inserted at the
        // top. For size 1 the table is the identity and the butterfly loop
        // below never runs, which makes N=1 the base case for free.
        let bits = size.trailing_zeros();
        let mut permutation = vec![0usize; size];
        for i in 1..size {
            permutation[i] = (permutation[i >> 1] >> 1) | ((i & 1) << (bits - 1) as usize);
        }

        Self {
            size,
            twiddles,
            permutation,
        }
    }

    /// Transform size this plan was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The precomputed forward twiddle factors (`N/2` roots of unity).
    pub fn twiddles(&self) -> &[Complex<f32>] {
        &self.twiddles
    }

    /// In-place iterative radix-2 decimation-in-time transform.
    ///
    /// `bins.len()` must equal `self.size()`; the engine guarantees this.
    pub(crate) fn process(&self, bins: &mut [Complex<f32>]) {
        debug_assert_eq!(bins.len(), self.size);

        for i in 0..self.size {
            let j = self.permutation[i];
            if i < j {
                bins.swap(i, j);
            }
        }

        let mut len = 2;
        while len <= self.size {
            let stride = self.size / len;
            let half = len / 2;
            for start in (0..self.size).step_by(len) {
                for k in 0..half {
                    let w = self.twiddles[k * stride];
                    let a = bins[start + k];
                    let b = bins[start + k + half] * w;
                    bins[start + k] = a + b;
                    bins[start + k + half] = a - b;
                }
            }
            len *= 2;
        }
    }
}
