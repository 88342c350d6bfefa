//! # filterlab Core DSP Library
//!
//! This crate provides the data and signal-processing layer behind filterlab,
//! a desktop tool for inspecting the frequency response of digital filters.
//!
//! ## Overview
//!
//! A filter lives in the library as a transfer function H(z) = B(z)/A(z),
//! held in a [`FilterSpec`] together with the display state the plot views
//! share (sample rate, frequency range, units). The crate covers:
//!
//! - **Response evaluation**: sample H(e^jω) on a full period of the unit
//!   circle via zero-padded FFTs
//! - **Sanitization**: replace non-finite response samples before any
//!   magnitude or phase math
//! - **Range selection**: cut or recenter the full-period response for the
//!   symmetric, half, or whole display range
//! - **Phase extraction**: wrapped or continuous (unwrapped) phase curves
//!   in radians, radians/π, or degrees
//!
//! ## Signal Flow
//!
//! ```text
//! b, a ──▶ freqz (FFT ÷ FFT) ──▶ sanitize ──▶ select_range ──▶ phase_curve ──▶ plot
//! ```
//!
//! ## Example
//!
//! ```rust
//! use filterlab_core::phase::{phase_curve, PhaseUnit};
//! use filterlab_core::response::{freqz, select_range, DisplayRange};
//!
//! // Five-tap moving average, evaluated on 256 points of the full period
//! let b = [0.2; 5];
//! let mut response = freqz(&b, &[1.0], 256, true).unwrap();
//! response.sanitize();
//!
//! // First half of the period, frequency axis for f_S = 48 kHz
//! let (freqs, h) = select_range(&response, DisplayRange::Half, 48_000.0);
//! let phase = phase_curve(&h, false, PhaseUnit::Deg);
//! assert_eq!(freqs.len(), phase.len());
//! ```

pub mod fft_utils;
pub mod filter_spec;
pub mod phase;
pub mod response;
pub mod types;

// Re-export main types
pub use fft_utils::FftProcessor;
pub use filter_spec::{
    shared, presets, FilterClass, FilterPreset, FilterSpec, FreqUnit, ResponseKind,
    SharedFilterSpec,
};
pub use phase::{phase_curve, unwrap_phase, wrap_angle, PhaseUnit};
pub use response::{freqz, nan_to_num, select_range, DisplayRange, FrequencyResponse};
pub use types::{AnalysisError, AnalysisResult, Complex};
