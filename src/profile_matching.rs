//! Gap-based Profile Matching.
//!
//! Each criterion gap (`actual - ideal`) is mapped through a fixed score
//! table; core and secondary factor scores are averaged per group and the
//! group averages are weighted by the summed AHP weight of each group.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{check_weights, McdmError};
use crate::matrix::DecisionMatrix;
use crate::ranking::Ranking;
use crate::types::FactorGroup;

/// Score for |gap| = 0..=5.
pub const GAP_SCORE_TABLE: [f64; 6] = [5.0, 4.5, 4.0, 3.5, 3.0, 2.5];

/// Score for any gap outside the table, including non-integral gaps.
pub const GAP_FALLBACK_SCORE: f64 = 1.0;

/// Width of the 1..=5 assessment scale, used by [`ProfileMatchRanking::closeness`].
pub const SCALE_RANGE: f64 = 4.0;

/// Maps a signed gap to its score.
pub fn gap_score(gap: f64) -> f64 {
    let magnitude = gap.abs();
    if magnitude.fract() == 0.0 && magnitude < GAP_SCORE_TABLE.len() as f64 {
        GAP_SCORE_TABLE[magnitude as usize]
    } else {
        GAP_FALLBACK_SCORE
    }
}

/// Per-alternative detail behind a Profile Matching score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileBreakdown {
    pub gaps: Vec<f64>,
    pub gap_scores: Vec<f64>,
    /// Mean gap score over core factors (0 when there are none).
    pub core_average: f64,
    /// Mean gap score over secondary factors (0 when there are none).
    pub secondary_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMatchRanking {
    pub scores: Vec<f64>,
    pub ranking: Ranking,
    pub breakdown: Vec<ProfileBreakdown>,
    /// Summed weight of core-factor criteria.
    pub core_weight: f64,
    /// Summed weight of secondary-factor criteria.
    pub secondary_weight: f64,
}

impl ProfileMatchRanking {
    /// Core weight as a fraction of total weight (0 when the total is 0).
    pub fn core_share(&self) -> f64 {
        let total = self.core_weight + self.secondary_weight;
        if total > 0.0 {
            self.core_weight / total
        } else {
            0.0
        }
    }

    /// Closeness to the ideal per alternative and criterion: `1 - |gap| / 4`.
    pub fn closeness(&self) -> Vec<Vec<f64>> {
        self.breakdown
            .iter()
            .map(|b| b.gaps.iter().map(|g| 1.0 - g.abs() / SCALE_RANGE).collect())
            .collect()
    }
}

/// Summed weight of (core, secondary) criteria.
pub fn group_weights(weights: &[f64], grouping: &[FactorGroup]) -> (f64, f64) {
    weights
        .iter()
        .zip(grouping)
        .fold((0.0, 0.0), |(core, secondary), (w, g)| {
            if g.is_core() {
                (core + w, secondary)
            } else {
                (core, secondary + w)
            }
        })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Ranks alternatives by weighted closeness to the ideal profile.
pub fn rank_by_profile_match(
    ideal: &[u8],
    actuals: &DecisionMatrix,
    weights: &[f64],
    grouping: &[FactorGroup],
) -> Result<ProfileMatchRanking, McdmError> {
    let n = actuals.criteria();
    if ideal.len() != n {
        return Err(McdmError::ShapeMismatch {
            what: "ideal profile",
            expected: n,
            got: ideal.len(),
        });
    }
    check_weights(weights, n)?;
    if grouping.len() != n {
        return Err(McdmError::ShapeMismatch {
            what: "factor grouping",
            expected: n,
            got: grouping.len(),
        });
    }
    actuals.check_finite()?;

    let (core_weight, secondary_weight) = group_weights(weights, grouping);
    let values = actuals.values();

    let mut scores = Vec::with_capacity(actuals.alternatives());
    let mut breakdown = Vec::with_capacity(actuals.alternatives());
    for row in 0..actuals.alternatives() {
        let gaps: Vec<f64> = (0..n)
            .map(|col| values[(row, col)] - f64::from(ideal[col]))
            .collect();
        let gap_scores: Vec<f64> = gaps.iter().map(|&g| gap_score(g)).collect();

        let mut core = Vec::new();
        let mut secondary = Vec::new();
        for (score, group) in gap_scores.iter().zip(grouping) {
            if group.is_core() {
                core.push(*score);
            } else {
                secondary.push(*score);
            }
        }
        let core_average = mean(&core);
        let secondary_average = mean(&secondary);

        scores.push(core_average * core_weight + secondary_average * secondary_weight);
        breakdown.push(ProfileBreakdown {
            gaps,
            gap_scores,
            core_average,
            secondary_average,
        });
    }
    debug!(core_weight, secondary_weight, "profile matching scored");

    let ranking = Ranking::from_scores(&scores);
    Ok(ProfileMatchRanking {
        scores,
        ranking,
        breakdown,
        core_weight,
        secondary_weight,
    })
}
