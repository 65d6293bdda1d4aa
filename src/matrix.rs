//! Typed matrices shared by the three procedures.
//!
//! Both wrappers own a dense `nalgebra::DMatrix<f64>` and are built from
//! JSON-friendly row vectors. Procedures borrow them immutably.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::McdmError;

/// Which side of a comparison pair is more important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Favored {
    First,
    Second,
}

/// Wording of the 1..=9 comparison scale.
pub fn intensity_label(intensity: u8) -> Option<&'static str> {
    let label = match intensity {
        1 => "Equally Preferred",
        2 => "Equally to Moderately",
        3 => "Moderately Preferred",
        4 => "Moderately to Strongly",
        5 => "Strongly Preferred",
        6 => "Strongly to Very Strongly",
        7 => "Very Strongly Preferred",
        8 => "Very Strongly to Extremely",
        9 => "Extremely Preferred",
        _ => return None,
    };
    Some(label)
}

fn from_row_vecs(rows: &[Vec<f64>], what: &'static str) -> Result<DMatrix<f64>, McdmError> {
    let nrows = rows.len();
    let ncols = rows.first().map(Vec::len).unwrap_or(0);
    if nrows == 0 || ncols == 0 {
        return Err(McdmError::Empty { what });
    }
    for row in rows {
        if row.len() != ncols {
            return Err(McdmError::ShapeMismatch {
                what,
                expected: ncols,
                got: row.len(),
            });
        }
    }
    Ok(DMatrix::from_fn(nrows, ncols, |r, c| rows[r][c]))
}

fn to_row_vecs(values: &DMatrix<f64>) -> Vec<Vec<f64>> {
    (0..values.nrows())
        .map(|r| (0..values.ncols()).map(|c| values[(r, c)]).collect())
        .collect()
}

/// Square reciprocal matrix of criterion comparisons.
///
/// Reciprocity is maintained by [`PairwiseMatrix::record`]; matrices loaded
/// with [`PairwiseMatrix::from_rows`] are trusted as given.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrix {
    values: DMatrix<f64>,
}

impl PairwiseMatrix {
    /// All-ones matrix: every criterion equally important.
    pub fn identity(n: usize) -> Self {
        Self {
            values: DMatrix::from_element(n, n, 1.0),
        }
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, McdmError> {
        let values = from_row_vecs(rows, "pairwise matrix")?;
        if values.nrows() != values.ncols() {
            return Err(McdmError::NotSquare {
                rows: values.nrows(),
                cols: values.ncols(),
            });
        }
        Ok(Self { values })
    }

    /// Builds `A[i][j] = v_i / v_j`, a perfectly consistent matrix.
    pub fn from_priorities(priorities: &[f64]) -> Result<Self, McdmError> {
        if priorities.is_empty() {
            return Err(McdmError::Empty { what: "priorities" });
        }
        for (index, &value) in priorities.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(McdmError::InvalidWeight { index, value });
            }
        }
        let n = priorities.len();
        Ok(Self {
            values: DMatrix::from_fn(n, n, |i, j| priorities[i] / priorities[j]),
        })
    }

    /// Records one comparison: `favored` is `intensity` times more important
    /// than the other criterion of the pair. Writes both reciprocal cells.
    pub fn record(
        &mut self,
        i: usize,
        j: usize,
        favored: Favored,
        intensity: u8,
    ) -> Result<(), McdmError> {
        let n = self.size();
        for index in [i, j] {
            if index >= n {
                return Err(McdmError::IndexOutOfBounds { index, size: n });
            }
        }
        if i == j {
            return Err(McdmError::SelfComparison { index: i });
        }
        if !(1..=9).contains(&intensity) {
            return Err(McdmError::IntensityOutOfRange { intensity });
        }
        let v = f64::from(intensity);
        let (a_ij, a_ji) = match favored {
            Favored::First => (v, 1.0 / v),
            Favored::Second => (1.0 / v, v),
        };
        self.values[(i, j)] = a_ij;
        self.values[(j, i)] = a_ji;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.size() && j < self.size()).then(|| self.values[(i, j)])
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        to_row_vecs(&self.values)
    }
}

/// Alternatives × criteria score table.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    values: DMatrix<f64>,
}

impl DecisionMatrix {
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, McdmError> {
        Ok(Self {
            values: from_row_vecs(rows, "decision matrix")?,
        })
    }

    pub fn alternatives(&self) -> usize {
        self.values.nrows()
    }

    pub fn criteria(&self) -> usize {
        self.values.ncols()
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        to_row_vecs(&self.values)
    }

    /// Copy with every cell passed through `f`.
    pub fn map(&self, f: impl FnMut(f64) -> f64) -> Self {
        Self {
            values: self.values.map(f),
        }
    }

    /// Copy keeping only the first `max` rows.
    pub fn truncate_rows(&self, max: usize) -> Self {
        let keep = self.values.nrows().min(max).max(1);
        Self {
            values: DMatrix::from_fn(keep, self.values.ncols(), |r, c| self.values[(r, c)]),
        }
    }

    pub(crate) fn check_finite(&self) -> Result<(), McdmError> {
        for r in 0..self.values.nrows() {
            for c in 0..self.values.ncols() {
                let value = self.values[(r, c)];
                if !value.is_finite() {
                    return Err(McdmError::NonFinite {
                        what: "decision matrix",
                        row: r,
                        col: c,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_matrix_reciprocal() {
        let mut m = PairwiseMatrix::identity(3);
        m.record(0, 2, Favored::First, 5).unwrap();
        m.record(1, 2, Favored::Second, 3).unwrap();

        assert_eq!(m.get(0, 2), Some(5.0));
        assert!((m.get(2, 0).unwrap() - 0.2).abs() < 1e-12);
        assert!((m.get(1, 2).unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.get(2, 1), Some(3.0));
        assert_eq!(m.get(1, 1), Some(1.0));
    }

    #[test]
    fn record_rejects_bad_indices_and_intensity() {
        let mut m = PairwiseMatrix::identity(2);
        assert_eq!(
            m.record(0, 0, Favored::First, 3),
            Err(McdmError::SelfComparison { index: 0 })
        );
        assert_eq!(
            m.record(0, 2, Favored::First, 3),
            Err(McdmError::IndexOutOfBounds { index: 2, size: 2 })
        );
        assert_eq!(
            m.record(0, 1, Favored::First, 10),
            Err(McdmError::IntensityOutOfRange { intensity: 10 })
        );
        assert_eq!(
            m.record(0, 1, Favored::First, 0),
            Err(McdmError::IntensityOutOfRange { intensity: 0 })
        );
    }

    #[test]
    fn from_rows_rejects_ragged_and_non_square() {
        assert!(matches!(
            DecisionMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]),
            Err(McdmError::ShapeMismatch { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            PairwiseMatrix::from_rows(&[vec![1.0, 2.0]]),
            Err(McdmError::NotSquare { rows: 1, cols: 2 })
        ));
        assert!(matches!(
            DecisionMatrix::from_rows(&[]),
            Err(McdmError::Empty { .. })
        ));
    }

    #[test]
    fn decision_matrix_round_trips_rows_and_truncates() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let m = DecisionMatrix::from_rows(&rows).unwrap();
        assert_eq!(m.alternatives(), 3);
        assert_eq!(m.criteria(), 2);
        assert_eq!(m.to_rows(), rows);
        assert_eq!(m.truncate_rows(2).to_rows(), rows[..2].to_vec());
        assert_eq!(m.map(|v| v.min(4.0)).to_rows()[2], vec![4.0, 4.0]);
    }

    #[test]
    fn scale_labels_cover_one_to_nine() {
        assert_eq!(intensity_label(1), Some("Equally Preferred"));
        assert_eq!(intensity_label(9), Some("Extremely Preferred"));
        assert_eq!(intensity_label(10), None);
    }
}
