//! FFT Utilities for Frequency-Response Evaluation
//!
//! This module provides the FFT plumbing used to sample a filter's transfer
//! function on the unit circle.
//!
//! ## Why an FFT?
//!
//! Evaluating H(z) = B(z)/A(z) at the N-th roots of unity is exactly what a
//! zero-padded FFT of each coefficient vector computes:
//!
//! ```text
//! b[0..M] ──zero-pad to N──▶ FFT ──▶ B(e^jωk)
//!                                              ωk = 2πk/N, k = 0..N-1
//! a[0..L] ──zero-pad to N──▶ FFT ──▶ A(e^jωk)
//!
//! H(e^jωk) = B(e^jωk) / A(e^jωk)
//! ```
//!
//! One pointwise division later we have the complex response on a full period
//! of the frequency axis, ready for magnitude and phase display.

use rustfft::{num_complex::Complex64, Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// FFT processor sized for one response evaluation
pub struct FftProcessor {
    /// FFT size
    size: usize,
    /// Forward FFT instance
    fft_forward: Arc<dyn Fft<f64>>,
    /// Scratch buffer for FFT operations
    scratch: Vec<Complex64>,
}

impl fmt::Debug for FftProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftProcessor")
            .field("size", &self.size)
            .finish()
    }
}

impl FftProcessor {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft_forward = planner.plan_fft_forward(size);
        let scratch = vec![Complex64::new(0.0, 0.0); fft_forward.get_inplace_scratch_len()];

        Self {
            size,
            fft_forward,
            scratch,
        }
    }

    /// Compute the forward FFT in-place
    pub fn fft_inplace(&mut self, buffer: &mut [Complex64]) {
        assert_eq!(buffer.len(), self.size);
        self.fft_forward.process_with_scratch(buffer, &mut self.scratch);
    }

    /// Compute the forward FFT of a real coefficient vector, zero-padded
    /// (or truncated) to the FFT size
    pub fn fft_real(&mut self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));
        self.fft_inplace(&mut buffer);
        buffer
    }

    /// Compute magnitude spectrum (for visualization)
    pub fn magnitude_spectrum(spectrum: &[Complex64]) -> Vec<f64> {
        spectrum.iter().map(|c| c.norm()).collect()
    }

    /// Compute power spectrum in dB (for visualization)
    pub fn power_spectrum_db(spectrum: &[Complex64]) -> Vec<f64> {
        spectrum
            .iter()
            .map(|c| {
                let power = c.norm_sqr();
                if power > 1e-20 {
                    10.0 * power.log10()
                } else {
                    -200.0 // Floor value
                }
            })
            .collect()
    }

    /// FFT shift - move zero frequency to center (for visualization)
    pub fn fft_shift<T: Clone>(spectrum: &[T]) -> Vec<T> {
        let n = spectrum.len();
        let mid = n / 2;
        let mut shifted = Vec::with_capacity(n);
        shifted.extend_from_slice(&spectrum[mid..]);
        shifted.extend_from_slice(&spectrum[..mid]);
        shifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_real_dc_bin() {
        // The k=0 bin of a real vector's FFT is its plain sum.
        let mut processor = FftProcessor::new(16);
        let spectrum = processor.fft_real(&[0.2, 0.2, 0.2, 0.2, 0.2]);

        assert_eq!(spectrum.len(), 16);
        assert!((spectrum[0].re - 1.0).abs() < 1e-12);
        assert!(spectrum[0].im.abs() < 1e-12);
    }

    #[test]
    fn test_fft_real_impulse_is_flat() {
        // FFT of a unit impulse is 1 at every bin.
        let mut processor = FftProcessor::new(32);
        let spectrum = processor.fft_real(&[1.0]);

        for c in &spectrum {
            assert!((c.re - 1.0).abs() < 1e-12);
            assert!(c.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_fft_shift_even() {
        let shifted = FftProcessor::fft_shift(&[0, 1, 2, 3]);
        assert_eq!(shifted, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_fft_shift_odd() {
        let shifted = FftProcessor::fft_shift(&[0, 1, 2, 3, 4]);
        assert_eq!(shifted, vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_power_spectrum_floor() {
        let spectrum = vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];
        let db = FftProcessor::power_spectrum_db(&spectrum);
        assert_eq!(db[0], -200.0);
        assert!(db[1].abs() < 1e-12);
    }
}
