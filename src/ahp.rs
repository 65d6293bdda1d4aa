//! AHP criterion weighting.
//!
//! Weights are the row averages of the column-normalized comparison matrix.
//! Consistency is estimated from `λmax` against Saaty's random index.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::McdmError;
use crate::matrix::PairwiseMatrix;

/// Saaty random index for n = 1..=10.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Conventional upper bound for an acceptable consistency ratio.
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Random index for an `n`-criterion matrix. Sizes past the table use the last entry.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX[RANDOM_INDEX.len() - 1],
    }
}

/// Weights plus the consistency diagnostics that produced the ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingResult {
    /// Criterion weights in matrix order; sums to 1.
    pub weights: Vec<f64>,
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub random_index: f64,
    pub consistency_ratio: f64,
}

impl WeightingResult {
    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.consistency_ratio <= threshold
    }
}

/// Consistency index for an `n`-criterion matrix with principal eigenvalue estimate `lambda_max`.
pub fn consistency_index(lambda_max: f64, n: usize) -> f64 {
    if n > 1 {
        (lambda_max - n as f64) / (n as f64 - 1.0)
    } else {
        0.0
    }
}

/// Validates the matrix column by column and returns the column sums.
///
/// Within a column: non-finite and negative entries fail first, then an
/// all-zero column fails as [`McdmError::ZeroColumnSum`], then any single
/// zero entry fails as non-positive.
fn column_sums(matrix: &PairwiseMatrix) -> Result<Vec<f64>, McdmError> {
    let values = matrix.values();
    let mut sums = Vec::with_capacity(values.ncols());
    for (col, column) in values.column_iter().enumerate() {
        for (row, &value) in column.iter().enumerate() {
            if !value.is_finite() {
                return Err(McdmError::NonFinite {
                    what: "pairwise matrix",
                    row,
                    col,
                    value,
                });
            }
            if value < 0.0 {
                return Err(McdmError::NonPositiveComparison { row, col, value });
            }
        }
        let sum: f64 = column.iter().sum();
        if sum == 0.0 {
            return Err(McdmError::ZeroColumnSum { column: col });
        }
        if let Some(row) = column.iter().position(|&v| v == 0.0) {
            return Err(McdmError::NonPositiveComparison {
                row,
                col,
                value: 0.0,
            });
        }
        sums.push(sum);
    }
    Ok(sums)
}

/// Derives criterion weights and the consistency ratio.
///
/// Reciprocity is trusted, not re-checked. A zero column sum fails with
/// [`McdmError::ZeroColumnSum`]; any other zero entry fails as non-positive.
/// Columns are checked left to right.
pub fn compute_weights(matrix: &PairwiseMatrix) -> Result<WeightingResult, McdmError> {
    let n = matrix.size();
    if n == 0 {
        return Err(McdmError::Empty {
            what: "pairwise matrix",
        });
    }
    let sums = column_sums(matrix)?;

    let a = matrix.values();
    let mut normalized = a.clone();
    for (col, sum) in sums.iter().enumerate() {
        for row in 0..n {
            normalized[(row, col)] /= *sum;
        }
    }

    let weights: Vec<f64> = (0..n)
        .map(|row| normalized.row(row).iter().sum::<f64>() / n as f64)
        .collect();

    let weighted = a * nalgebra::DVector::from_column_slice(&weights);
    let lambda_max = (0..n).map(|i| weighted[i] / weights[i]).sum::<f64>() / n as f64;

    let ci = consistency_index(lambda_max, n);
    let ri = random_index(n);
    let cr = if ri != 0.0 { ci / ri } else { 0.0 };
    debug!(n, lambda_max, ci, cr, "computed AHP weights");

    Ok(WeightingResult {
        weights,
        lambda_max,
        consistency_index: ci,
        random_index: ri,
        consistency_ratio: cr,
    })
}
