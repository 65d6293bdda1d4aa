//! TOPSIS distance ranking.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{check_weights, McdmError};
use crate::matrix::DecisionMatrix;
use crate::ranking::Ranking;
use crate::types::Polarity;

/// Score assigned when a row sits on both ideal points (`d+ = d- = 0`).
pub const DEGENERATE_DISTANCE_SCORE: f64 = 0.5;

/// Scores, ranking and the intermediate geometry of one TOPSIS run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRanking {
    /// Closeness coefficient per alternative, in [0, 1].
    pub scores: Vec<f64>,
    pub ranking: Ranking,
    pub distance_to_best: Vec<f64>,
    pub distance_to_worst: Vec<f64>,
    /// Weighted ideal-best value per criterion.
    pub ideal_best: Vec<f64>,
    /// Weighted ideal-worst value per criterion.
    pub ideal_worst: Vec<f64>,
    /// Rows scored with [`DEGENERATE_DISTANCE_SCORE`].
    pub degenerate_rows: Vec<usize>,
}

/// Vector-normalizes each column. All-zero columns stay zero.
fn normalize_columns(values: &DMatrix<f64>) -> DMatrix<f64> {
    let mut out = values.clone();
    for col in 0..values.ncols() {
        let norm = values.column(col).norm();
        if norm == 0.0 {
            debug!(column = col, "zero-norm criterion column left at zero");
            continue;
        }
        for row in 0..values.nrows() {
            out[(row, col)] /= norm;
        }
    }
    out
}

fn euclidean(a: impl Iterator<Item = f64>, b: &[f64]) -> f64 {
    a.zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

/// Ranks alternatives by closeness to the ideal solution.
///
/// `weights` and `polarity` must have one entry per matrix column.
pub fn rank_by_distance(
    matrix: &DecisionMatrix,
    weights: &[f64],
    polarity: &[Polarity],
) -> Result<DistanceRanking, McdmError> {
    let n = matrix.criteria();
    let m = matrix.alternatives();
    check_weights(weights, n)?;
    if polarity.len() != n {
        return Err(McdmError::ShapeMismatch {
            what: "polarity",
            expected: n,
            got: polarity.len(),
        });
    }
    matrix.check_finite()?;

    let mut weighted = normalize_columns(matrix.values());
    for col in 0..n {
        for row in 0..m {
            weighted[(row, col)] *= weights[col];
        }
    }

    let mut ideal_best = Vec::with_capacity(n);
    let mut ideal_worst = Vec::with_capacity(n);
    for (col, pol) in polarity.iter().enumerate() {
        let column = weighted.column(col);
        let (max, min) = (column.max(), column.min());
        if pol.is_benefit() {
            ideal_best.push(max);
            ideal_worst.push(min);
        } else {
            ideal_best.push(min);
            ideal_worst.push(max);
        }
    }

    let mut scores = Vec::with_capacity(m);
    let mut distance_to_best = Vec::with_capacity(m);
    let mut distance_to_worst = Vec::with_capacity(m);
    let mut degenerate_rows = Vec::new();
    for row in 0..m {
        let d_best = euclidean(weighted.row(row).iter().copied(), &ideal_best);
        let d_worst = euclidean(weighted.row(row).iter().copied(), &ideal_worst);
        let total = d_best + d_worst;
        let score = if total > 0.0 {
            d_worst / total
        } else {
            degenerate_rows.push(row);
            DEGENERATE_DISTANCE_SCORE
        };
        scores.push(score);
        distance_to_best.push(d_best);
        distance_to_worst.push(d_worst);
    }
    if !degenerate_rows.is_empty() {
        debug!(rows = ?degenerate_rows, "rows coincide with both ideal points");
    }

    let ranking = Ranking::from_scores(&scores);
    Ok(DistanceRanking {
        scores,
        ranking,
        distance_to_best,
        distance_to_worst,
        ideal_best,
        ideal_worst,
        degenerate_rows,
    })
}
