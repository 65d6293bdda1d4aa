//! Error types for the numeric core.

use thiserror::Error;

/// Failures raised by the weighting and ranking procedures.
///
/// Advisories (high consistency ratio, low core-factor share) are never
/// errors; see [`crate::session::Advisory`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum McdmError {
    /// A matrix or vector disagrees with the declared criterion/alternative count.
    #[error("{what}: expected length {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Matrix has no rows or no columns.
    #[error("{what} is empty")]
    Empty { what: &'static str },

    /// Pairwise matrix must be square.
    #[error("pairwise matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A pairwise column sums to zero, so column normalization is undefined.
    #[error("pairwise matrix column {column} sums to zero")]
    ZeroColumnSum { column: usize },

    /// Pairwise comparisons must be strictly positive.
    #[error("pairwise entry ({row}, {col}) must be positive, got {value}")]
    NonPositiveComparison { row: usize, col: usize, value: f64 },

    /// NaN or infinity in an input matrix.
    #[error("{what} entry ({row}, {col}) is not finite: {value}")]
    NonFinite {
        what: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },

    /// Weight vector entry is negative or not finite.
    #[error("weight {index} is invalid: {value}")]
    InvalidWeight { index: usize, value: f64 },

    /// Comparison intensity outside the 1..=9 scale.
    #[error("comparison intensity must be in 1..=9, got {intensity}")]
    IntensityOutOfRange { intensity: u8 },

    /// Criterion index outside the matrix.
    #[error("criterion index {index} out of bounds for {size} criteria")]
    IndexOutOfBounds { index: usize, size: usize },

    /// A criterion cannot be compared against itself.
    #[error("cannot compare criterion {index} with itself")]
    SelfComparison { index: usize },
}

impl McdmError {
    /// True for the ShapeMismatch class of errors (wrong lengths or empty input).
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            McdmError::ShapeMismatch { .. } | McdmError::Empty { .. } | McdmError::NotSquare { .. }
        )
    }

    /// True for the DegenerateInput class (values that make the math undefined).
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            McdmError::ZeroColumnSum { .. }
                | McdmError::NonPositiveComparison { .. }
                | McdmError::NonFinite { .. }
                | McdmError::InvalidWeight { .. }
        )
    }
}

/// Checks that a weight vector has `expected` finite, non-negative entries.
pub(crate) fn check_weights(weights: &[f64], expected: usize) -> Result<(), McdmError> {
    if weights.len() != expected {
        return Err(McdmError::ShapeMismatch {
            what: "weights",
            expected,
            got: weights.len(),
        });
    }
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(McdmError::InvalidWeight { index, value });
        }
    }
    Ok(())
}
