//! Phase Extraction and Display Units
//!
//! Turns complex response samples into a plottable phase curve. The curve is
//! either wrapped (raw angles, constrained to (-π, π]) or unwrapped
//! (2π corrections applied so the trajectory stays continuous), then scaled
//! into the display unit the user picked.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::types::Complex;

/// Angular display unit for phase curves.
///
/// Each unit is a fixed multiplicative scale on radians, so switching units
/// never touches the stored response, only the derived curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhaseUnit {
    /// Radians, scale 1
    #[default]
    Rad,
    /// Radians divided by π, so the Nyquist phase of a pure delay reads as
    /// the delay in samples
    RadOverPi,
    /// Degrees, scale 180/π
    Deg,
}

impl PhaseUnit {
    /// Multiplicative factor applied to a phase value in radians
    pub fn scale(&self) -> f64 {
        match self {
            PhaseUnit::Rad => 1.0,
            PhaseUnit::RadOverPi => 1.0 / PI,
            PhaseUnit::Deg => 180.0 / PI,
        }
    }

    /// Short name for combo boxes
    pub fn name(&self) -> &'static str {
        match self {
            PhaseUnit::Rad => "rad",
            PhaseUnit::RadOverPi => "rad/π",
            PhaseUnit::Deg => "deg",
        }
    }

    /// Y-axis label for the phase plot
    pub fn axis_label(&self) -> &'static str {
        match self {
            PhaseUnit::Rad => "Phase (rad)",
            PhaseUnit::RadOverPi => "Phase (rad/π)",
            PhaseUnit::Deg => "Phase (deg)",
        }
    }

    /// All variants, in combo-box order
    pub const ALL: [PhaseUnit; 3] = [PhaseUnit::Rad, PhaseUnit::RadOverPi, PhaseUnit::Deg];
}

/// Wrap a single angle to (-π, π].
#[inline]
pub fn wrap_angle(x: f64) -> f64 {
    let mut y = x % TAU;
    if y > PI {
        y -= TAU;
    } else if y <= -PI {
        y += TAU;
    }
    y
}

/// Unwrap phase angles to produce a continuous trajectory.
///
/// When the difference between consecutive samples exceeds π, a 2π correction
/// is applied to remove the discontinuity. Input angles are expected to be
/// bounded (plain `atan2` output), so a single correction per step suffices.
pub fn unwrap_phase(input: &[f64]) -> Vec<f64> {
    if input.is_empty() {
        return Vec::new();
    }
    let mut output = Vec::with_capacity(input.len());
    output.push(input[0]);
    let mut cumulative_correction = 0.0;

    for i in 1..input.len() {
        let diff = input[i] - input[i - 1];
        if diff > PI {
            cumulative_correction -= TAU;
        } else if diff < -PI {
            cumulative_correction += TAU;
        }
        output.push(input[i] + cumulative_correction);
    }

    output
}

/// Phase curve of a complex response, wrapped or unwrapped, in `unit`.
pub fn phase_curve(h: &[Complex], wrapped: bool, unit: PhaseUnit) -> Vec<f64> {
    let raw: Vec<f64> = h.iter().map(|c| c.arg()).collect();
    let phase = if wrapped {
        raw.into_iter().map(wrap_angle).collect()
    } else {
        unwrap_phase(&raw)
    };

    let scale = unit.scale();
    phase.into_iter().map(|p| p * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle_half_open_range() {
        let mut x = -10.0;
        while x < 10.0 {
            let y = wrap_angle(x);
            assert!(y > -PI && y <= PI, "wrap_angle({x}) = {y} out of range");
            x += 0.1;
        }
    }

    #[test]
    fn test_wrap_angle_boundaries() {
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert!(wrap_angle(TAU).abs() < 1e-12);
        assert!(wrap_angle(0.0).abs() < 1e-12);
    }

    #[test]
    fn test_unwrap_linear_phase() {
        // Wrapped linear phase unwraps back to a straight line.
        let freq = 0.3;
        let wrapped: Vec<f64> = (0..100).map(|i| wrap_angle(freq * i as f64)).collect();
        let unwrapped = unwrap_phase(&wrapped);
        for i in 1..unwrapped.len() {
            let diff = unwrapped[i] - unwrapped[i - 1];
            assert!((diff - freq).abs() < 1e-9, "non-linear at {i}: diff={diff}");
        }
    }

    #[test]
    fn test_unwrap_descending_phase() {
        let wrapped: Vec<f64> = (0..100).map(|i| wrap_angle(-0.5 * i as f64)).collect();
        let unwrapped = unwrap_phase(&wrapped);
        for i in 1..unwrapped.len() {
            let diff = unwrapped[i] - unwrapped[i - 1];
            assert!(diff.abs() <= PI, "jump at {i}: {diff}");
            assert!((diff + 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unwrap_empty_and_single() {
        assert!(unwrap_phase(&[]).is_empty());
        assert_eq!(unwrap_phase(&[1.25]), vec![1.25]);
    }

    #[test]
    fn test_unit_scales() {
        assert_eq!(PhaseUnit::Rad.scale(), 1.0);
        assert!((PhaseUnit::RadOverPi.scale() * PI - 1.0).abs() < 1e-15);
        assert!((PhaseUnit::Deg.scale() * PI - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_scaling_is_invertible() {
        let value = 2.3;
        for unit in PhaseUnit::ALL {
            let back = value * unit.scale() / unit.scale();
            assert!((back - value).abs() < 1e-12, "{} not invertible", unit.name());
        }
    }

    #[test]
    fn test_phase_curve_wrapped_in_range() {
        let h: Vec<Complex> = (0..64)
            .map(|k| Complex::from_polar(1.0, 0.7 * k as f64))
            .collect();
        let curve = phase_curve(&h, true, PhaseUnit::Rad);
        for &p in &curve {
            assert!(p > -PI && p <= PI);
        }
    }

    #[test]
    fn test_phase_curve_degrees() {
        let h = vec![
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(-1.0, 0.0),
        ];
        let curve = phase_curve(&h, false, PhaseUnit::Deg);
        assert!(curve[0].abs() < 1e-12);
        assert!((curve[1] - 90.0).abs() < 1e-9);
        assert!((curve[2] - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_phase_curve_unwrapped_continuous() {
        // A steadily rotating response has no π-sized jumps after unwrap.
        let h: Vec<Complex> = (0..200)
            .map(|k| Complex::from_polar(1.0, -0.9 * k as f64))
            .collect();
        let curve = phase_curve(&h, false, PhaseUnit::Rad);
        for i in 1..curve.len() {
            assert!((curve[i] - curve[i - 1]).abs() <= PI);
        }
    }
}
