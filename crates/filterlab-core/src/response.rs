//! Complex frequency response of a digital filter
//!
//! A [`FrequencyResponse`] pairs the frequency grid (radians per sample) with
//! the complex response samples on that grid. [`freqz`] produces one by
//! evaluating H(e^jω) = B(e^jω)/A(e^jω) over a full period of the unit circle,
//! and [`select_range`] cuts or reorders it for the frequency range the user
//! wants on screen.
//!
//! Responses straight out of [`freqz`] can contain non-finite samples: a pole
//! sitting on (or numerically near) the unit circle turns the pointwise
//! division into inf or NaN at that bin. [`FrequencyResponse::sanitize`]
//! replaces those before any magnitude or phase math sees them.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::fft_utils::FftProcessor;
use crate::types::{AnalysisError, AnalysisResult, Complex};

/// Frequency samples paired one-to-one with complex response values.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    w: Vec<f64>,
    h: Vec<Complex>,
}

impl FrequencyResponse {
    /// Build a response from matching frequency and value sequences.
    pub fn new(w: Vec<f64>, h: Vec<Complex>) -> AnalysisResult<Self> {
        if w.len() != h.len() {
            return Err(AnalysisError::LengthMismatch {
                freqs: w.len(),
                values: h.len(),
            });
        }
        Ok(Self { w, h })
    }

    /// Frequency grid in radians per sample.
    pub fn w(&self) -> &[f64] {
        &self.w
    }

    /// Complex response samples.
    pub fn h(&self) -> &[Complex] {
        &self.h
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.w.len()
    }

    /// True when the response holds no samples.
    pub fn is_empty(&self) -> bool {
        self.w.is_empty()
    }

    /// Replace non-finite response components in place.
    ///
    /// NaN becomes 0, +inf becomes `f64::MAX`, -inf becomes `f64::MIN`,
    /// separately for the real and imaginary parts. Returns how many samples
    /// were touched. Never fails; the length is unchanged.
    pub fn sanitize(&mut self) -> usize {
        let mut replaced = 0;
        for value in &mut self.h {
            let fixed = nan_to_num(*value);
            if fixed != *value {
                replaced += 1;
                *value = fixed;
            }
        }
        replaced
    }
}

/// Map a single complex value onto finite components.
pub fn nan_to_num(value: Complex) -> Complex {
    Complex::new(finite_or_clamped(value.re), finite_or_clamped(value.im))
}

fn finite_or_clamped(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else if x == f64::INFINITY {
        f64::MAX
    } else if x == f64::NEG_INFINITY {
        f64::MIN
    } else {
        x
    }
}

/// Evaluate H(e^jω) = B(e^jω)/A(e^jω) on `n_points` equally spaced
/// frequencies.
///
/// With `whole` set the grid covers [0, 2π); otherwise [0, π). Both
/// coefficient vectors are zero-padded to the FFT length, transformed, and
/// divided pointwise. Bins where the denominator vanishes come back non-finite
/// and are left for [`FrequencyResponse::sanitize`].
pub fn freqz(b: &[f64], a: &[f64], n_points: usize, whole: bool) -> AnalysisResult<FrequencyResponse> {
    if b.is_empty() {
        return Err(AnalysisError::EmptyCoefficients("numerator"));
    }
    if a.is_empty() {
        return Err(AnalysisError::EmptyCoefficients("denominator"));
    }
    if n_points == 0 {
        return FrequencyResponse::new(Vec::new(), Vec::new());
    }

    let fft_len = if whole { n_points } else { n_points * 2 };
    let mut processor = FftProcessor::new(fft_len);
    let num = processor.fft_real(b);
    let den = processor.fft_real(a);

    let step = TAU / fft_len as f64;
    let mut w = Vec::with_capacity(n_points);
    let mut h = Vec::with_capacity(n_points);
    for k in 0..n_points {
        w.push(step * k as f64);
        h.push(num[k] / den[k]);
    }
    FrequencyResponse::new(w, h)
}

/// Which part of the frequency axis a plot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayRange {
    /// -f_S/2 .. f_S/2, zero frequency centered
    Symmetric,
    /// 0 .. f_S/2, the usual view for real-coefficient filters
    #[default]
    Half,
    /// 0 .. f_S, the full period
    Whole,
}

impl DisplayRange {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            DisplayRange::Symmetric => "-fS/2 .. fS/2",
            DisplayRange::Half => "0 .. fS/2",
            DisplayRange::Whole => "0 .. fS",
        }
    }

    /// Displayed frequency span in Hz for the given sample rate
    pub fn span(&self, sample_rate: f64) -> (f64, f64) {
        match self {
            DisplayRange::Symmetric => (-sample_rate / 2.0, sample_rate / 2.0),
            DisplayRange::Half => (0.0, sample_rate / 2.0),
            DisplayRange::Whole => (0.0, sample_rate),
        }
    }

    /// All variants, in combo-box order
    pub const ALL: [DisplayRange; 3] = [
        DisplayRange::Symmetric,
        DisplayRange::Half,
        DisplayRange::Whole,
    ];
}

/// Cut a whole-period response down to the selected display range.
///
/// Returns the frequency axis in Hz paired with the response samples:
///
/// - `Whole`: axis [0, f_S), samples untouched.
/// - `Half`: the first half of both sequences, axis [0, f_S/2).
/// - `Symmetric`: samples rotated by [`FftProcessor::fft_shift`] so the upper
///   half-period lands in front as negative frequencies, axis shifted down by
///   f_S/2 to [-f_S/2, f_S/2).
pub fn select_range(
    response: &FrequencyResponse,
    range: DisplayRange,
    sample_rate: f64,
) -> (Vec<f64>, Vec<Complex>) {
    let scale = sample_rate / 2.0 / PI;
    let freqs: Vec<f64> = response.w().iter().map(|&w| w * scale).collect();

    match range {
        DisplayRange::Whole => (freqs, response.h().to_vec()),
        DisplayRange::Half => {
            let half = response.len() / 2;
            (freqs[..half].to_vec(), response.h()[..half].to_vec())
        }
        DisplayRange::Symmetric => {
            let shifted = freqs.iter().map(|&f| f - sample_rate / 2.0).collect();
            (shifted, FftProcessor::fft_shift(response.h()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_response(n: usize) -> FrequencyResponse {
        let w: Vec<f64> = (0..n).map(|k| TAU * k as f64 / n as f64).collect();
        let h: Vec<Complex> = (0..n).map(|k| Complex::new(k as f64, 0.0)).collect();
        FrequencyResponse::new(w, h).unwrap()
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = FrequencyResponse::new(vec![0.0, 1.0], vec![]).unwrap_err();
        assert_eq!(err, AnalysisError::LengthMismatch { freqs: 2, values: 0 });
    }

    #[test]
    fn test_sanitize_makes_everything_finite() {
        let w = vec![0.0, 1.0, 2.0, 3.0];
        let h = vec![
            Complex::new(f64::NAN, 0.0),
            Complex::new(f64::INFINITY, f64::NEG_INFINITY),
            Complex::new(1.0, 2.0),
            Complex::new(0.0, f64::NAN),
        ];
        let mut response = FrequencyResponse::new(w, h).unwrap();

        let replaced = response.sanitize();

        assert_eq!(replaced, 3);
        assert_eq!(response.len(), 4);
        for c in response.h() {
            assert!(c.re.is_finite() && c.im.is_finite());
        }
        assert_eq!(response.h()[0], Complex::new(0.0, 0.0));
        assert_eq!(response.h()[1], Complex::new(f64::MAX, f64::MIN));
        assert_eq!(response.h()[2], Complex::new(1.0, 2.0));
    }

    #[test]
    fn test_freqz_moving_average_dc_gain() {
        let b = [0.2; 5];
        let response = freqz(&b, &[1.0], 64, true).unwrap();

        assert_eq!(response.len(), 64);
        assert!((response.h()[0].re - 1.0).abs() < 1e-12);
        assert!(response.h()[0].im.abs() < 1e-12);
        // Uniform grid with step 2π/N
        assert!((response.w()[1] - TAU / 64.0).abs() < 1e-12);
        assert!((response.w()[63] - TAU * 63.0 / 64.0).abs() < 1e-12);
    }

    #[test]
    fn test_freqz_half_matches_whole_prefix() {
        let b = [0.5, 0.5];
        let half = freqz(&b, &[1.0], 32, false).unwrap();
        let whole = freqz(&b, &[1.0], 64, true).unwrap();

        assert_eq!(half.len(), 32);
        assert!(half.w()[31] < PI);
        for k in 0..32 {
            assert!((half.w()[k] - whole.w()[k]).abs() < 1e-12);
            assert!((half.h()[k] - whole.h()[k]).norm() < 1e-12);
        }
    }

    #[test]
    fn test_freqz_first_order_allpass_unit_magnitude() {
        // b is the reversed denominator, so |H| = 1 everywhere.
        let response = freqz(&[-0.5, 1.0], &[1.0, -0.5], 128, true).unwrap();
        for c in response.h() {
            assert!((c.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_freqz_zero_points_is_empty() {
        let response = freqz(&[1.0], &[1.0], 0, true).unwrap();
        assert!(response.is_empty());
        assert_eq!(response.len(), 0);
    }

    #[test]
    fn test_freqz_empty_coefficients() {
        assert_eq!(
            freqz(&[], &[1.0], 8, true).unwrap_err(),
            AnalysisError::EmptyCoefficients("numerator")
        );
        assert_eq!(
            freqz(&[1.0], &[], 8, true).unwrap_err(),
            AnalysisError::EmptyCoefficients("denominator")
        );
    }

    #[test]
    fn test_freqz_pole_on_unit_circle_sanitizes() {
        // a = [1, -1] has a pole at z = 1, so the DC bin divides by zero.
        let mut response = freqz(&[1.0], &[1.0, -1.0], 16, true).unwrap();
        let non_finite = response
            .h()
            .iter()
            .filter(|c| !c.re.is_finite() || !c.im.is_finite())
            .count();
        assert!(non_finite > 0);

        response.sanitize();
        for c in response.h() {
            assert!(c.re.is_finite() && c.im.is_finite());
        }
    }

    #[test]
    fn test_select_range_half_is_first_half() {
        let response = ramp_response(8);
        let (freqs, h) = select_range(&response, DisplayRange::Half, 2.0);

        assert_eq!(freqs.len(), 4);
        for (k, &f) in freqs.iter().enumerate() {
            assert!((f - 0.25 * k as f64).abs() < 1e-12);
        }
        let values: Vec<f64> = h.iter().map(|c| c.re).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_select_range_symmetric_shifts_and_rotates() {
        let response = ramp_response(8);
        let (freqs, h) = select_range(&response, DisplayRange::Symmetric, 2.0);

        // Axis is the whole-range axis minus f_S/2
        let (whole_freqs, _) = select_range(&response, DisplayRange::Whole, 2.0);
        for (f_sym, f_whole) in freqs.iter().zip(&whole_freqs) {
            assert!((f_sym - (f_whole - 1.0)).abs() < 1e-12);
        }
        assert!((freqs[0] + 1.0).abs() < 1e-12);
        assert!((freqs[7] - 0.75).abs() < 1e-12);

        // Samples come back rotated by half the sequence
        let values: Vec<f64> = h.iter().map(|c| c.re).collect();
        assert_eq!(values, vec![4.0, 5.0, 6.0, 7.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_select_range_whole_is_passthrough() {
        let response = ramp_response(8);
        let (freqs, h) = select_range(&response, DisplayRange::Whole, 2.0);

        assert_eq!(h.len(), 8);
        assert!((freqs[0]).abs() < 1e-12);
        assert!((freqs[7] - 1.75).abs() < 1e-12);
        assert_eq!(h[7].re, 7.0);
    }

    #[test]
    fn test_display_range_spans() {
        assert_eq!(DisplayRange::Symmetric.span(2.0), (-1.0, 1.0));
        assert_eq!(DisplayRange::Half.span(2.0), (0.0, 1.0));
        assert_eq!(DisplayRange::Whole.span(2.0), (0.0, 2.0));
    }
}
