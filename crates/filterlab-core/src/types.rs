//! Shared types for the filterlab DSP layer.

use num_complex::Complex64;

/// Complex sample used throughout the crate.
pub type Complex = Complex64;

/// Errors from frequency-response analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// A transfer function needs at least one tap on each side.
    #[error("empty {0} coefficient vector")]
    EmptyCoefficients(&'static str),

    /// Frequency and response sequences must pair up one-to-one.
    #[error("length mismatch: {freqs} frequency samples vs {values} response samples")]
    LengthMismatch { freqs: usize, values: usize },
}

/// Result alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = AnalysisError::EmptyCoefficients("numerator");
        assert_eq!(e.to_string(), "empty numerator coefficient vector");

        let e = AnalysisError::LengthMismatch { freqs: 8, values: 4 };
        assert!(e.to_string().contains("8 frequency samples"));
    }
}
