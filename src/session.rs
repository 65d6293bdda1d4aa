//! Decision context passed between the weighting and ranking steps.
//!
//! The numeric procedures are stateless. A [`DecisionSession`] carries what
//! an interactive front end would otherwise keep in global state: the named
//! criteria and alternatives, the cached AHP result, and the boundary rules
//! (clipping, truncation, advisories) applied before values reach the core.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::ahp::{compute_weights, WeightingResult};
use crate::config::DecisionConfig;
use crate::error::McdmError;
use crate::matrix::{DecisionMatrix, Favored, PairwiseMatrix};
use crate::profile_matching::{group_weights, rank_by_profile_match, ProfileMatchRanking};
use crate::topsis::{rank_by_distance, DistanceRanking};
use crate::types::{AlternativeSet, CriterionSet, FactorGroup, NameError, Polarity};

/// Domain warnings returned next to a result. None of these stop computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Consistency ratio above the configured threshold.
    InconsistentComparisons { consistency_ratio: f64, threshold: f64 },
    /// Core factors carry less than the required share of total weight.
    CoreFactorShareTooLow { share: f64, minimum: f64 },
    /// Raw values were clipped into the accepted range.
    ValuesClipped { count: usize, min: Option<f64>, max: f64 },
    /// Alternatives beyond the Profile Matching limit were dropped.
    AlternativesTruncated { kept: usize, dropped: usize },
}

impl Advisory {
    pub fn message(&self) -> String {
        match self {
            Advisory::InconsistentComparisons {
                consistency_ratio,
                threshold,
            } => format!(
                "Consistency ratio {consistency_ratio:.4} exceeds {threshold}; review the pairwise comparisons"
            ),
            Advisory::CoreFactorShareTooLow { share, minimum } => format!(
                "Core factor weight share {:.2}% is below {:.0}%; adjust the CF/SF selection",
                share * 100.0,
                minimum * 100.0
            ),
            Advisory::ValuesClipped { count, min, max } => match min {
                Some(min) => format!("{count} values were clipped into [{min}, {max}]"),
                None => format!("{count} values exceeded {max} and were capped"),
            },
            Advisory::AlternativesTruncated { kept, dropped } => format!(
                "Only the first {kept} alternatives are matched; {dropped} ignored"
            ),
        }
    }
}

/// A result plus the advisories raised while producing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessed<T> {
    pub result: T,
    pub advisories: Vec<Advisory>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Mcdm(#[from] McdmError),
    #[error("criteria weights have not been computed yet")]
    WeightsNotComputed,
    #[error("unknown criterion: {0}")]
    UnknownCriterion(String),
    #[error("{what} has {got} rows but there are {expected} alternatives")]
    AlternativeCountMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("ideal value {value} for criterion {index} is outside the scale [{min}, {max}]")]
    IdealOutOfScale {
        index: usize,
        value: u8,
        min: f64,
        max: f64,
    },
}

/// One named comparison: `more_important` is `intensity` times more
/// important than `less_important`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedComparison {
    pub more_important: String,
    pub less_important: String,
    pub intensity: u8,
}

/// Caps values above `max` (and raises values below `min` when given).
/// Returns the clipped matrix and the number of changed cells.
pub fn clip_values(matrix: &DecisionMatrix, min: Option<f64>, max: f64) -> (DecisionMatrix, usize) {
    let mut changed = 0usize;
    let clipped = matrix.map(|v| {
        // NaN is left for the core to reject.
        if v.is_nan() {
            return v;
        }
        let mut out = v.min(max);
        if let Some(lo) = min {
            out = out.max(lo);
        }
        if out != v {
            changed += 1;
        }
        out
    });
    (clipped, changed)
}

#[derive(Debug, Clone)]
pub struct DecisionSession {
    criteria: CriterionSet,
    alternatives: AlternativeSet,
    config: DecisionConfig,
    weighting: Option<WeightingResult>,
}

impl DecisionSession {
    pub fn new(criteria: CriterionSet, alternatives: AlternativeSet, config: DecisionConfig) -> Self {
        Self {
            criteria,
            alternatives,
            config,
            weighting: None,
        }
    }

    /// Validates raw names and builds a session with default config.
    pub fn from_names<C, A>(criteria: C, alternatives: A) -> Result<Self, SessionError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Ok(Self::new(
            CriterionSet::new(criteria)?,
            AlternativeSet::new(alternatives)?,
            DecisionConfig::default(),
        ))
    }

    pub fn criteria(&self) -> &CriterionSet {
        &self.criteria
    }

    pub fn alternatives(&self) -> &AlternativeSet {
        &self.alternatives
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn weighting(&self) -> Option<&WeightingResult> {
        self.weighting.as_ref()
    }

    pub fn weights(&self) -> Result<&[f64], SessionError> {
        self.weighting
            .as_ref()
            .map(|w| w.weights.as_slice())
            .ok_or(SessionError::WeightsNotComputed)
    }

    /// Builds a pairwise matrix from named comparisons. Pairs not mentioned
    /// stay at equal importance.
    pub fn pairwise_from_comparisons(
        &self,
        comparisons: &[NamedComparison],
    ) -> Result<PairwiseMatrix, SessionError> {
        let mut matrix = PairwiseMatrix::identity(self.criteria.len());
        for cmp in comparisons {
            let i = self
                .criteria
                .position(&cmp.more_important)
                .ok_or_else(|| SessionError::UnknownCriterion(cmp.more_important.clone()))?;
            let j = self
                .criteria
                .position(&cmp.less_important)
                .ok_or_else(|| SessionError::UnknownCriterion(cmp.less_important.clone()))?;
            matrix.record(i, j, Favored::First, cmp.intensity)?;
        }
        Ok(matrix)
    }

    /// Runs AHP and caches the weights for the ranking steps.
    pub fn weigh(
        &mut self,
        matrix: &PairwiseMatrix,
    ) -> Result<Assessed<WeightingResult>, SessionError> {
        if matrix.size() != self.criteria.len() {
            return Err(McdmError::ShapeMismatch {
                what: "pairwise matrix",
                expected: self.criteria.len(),
                got: matrix.size(),
            }
            .into());
        }
        let result = compute_weights(matrix)?;
        let mut advisories = Vec::new();
        if !result.is_consistent(self.config.consistency_threshold) {
            warn!(
                consistency_ratio = result.consistency_ratio,
                threshold = self.config.consistency_threshold,
                "pairwise comparisons are inconsistent"
            );
            advisories.push(Advisory::InconsistentComparisons {
                consistency_ratio: result.consistency_ratio,
                threshold: self.config.consistency_threshold,
            });
        } else {
            info!(consistency_ratio = result.consistency_ratio, "criteria weights computed");
        }
        self.weighting = Some(result.clone());
        Ok(Assessed { result, advisories })
    }

    /// Caps raw values, then ranks with TOPSIS using the cached weights.
    pub fn rank_by_distance(
        &self,
        raw: &DecisionMatrix,
        polarity: &[Polarity],
    ) -> Result<Assessed<DistanceRanking>, SessionError> {
        let weights = self.weights()?;
        self.check_rows("decision matrix", raw, self.alternatives.len())?;

        let mut advisories = Vec::new();
        let cap = self.config.distance_value_cap;
        let (matrix, clipped) = clip_values(raw, None, cap);
        if clipped > 0 {
            warn!(count = clipped, cap, "decision values capped");
            advisories.push(Advisory::ValuesClipped {
                count: clipped,
                min: None,
                max: cap,
            });
        }

        let result = rank_by_distance(&matrix, weights, polarity)?;
        Ok(Assessed { result, advisories })
    }

    /// Checks the ideal profile against the scale, truncates to the configured
    /// alternative limit, clips values to the profile scale, checks the core
    /// factor share, then ranks.
    ///
    /// Result rows correspond to [`Self::profile_alternatives`].
    pub fn rank_by_profile_match(
        &self,
        ideal: &[u8],
        raw: &DecisionMatrix,
        grouping: &[FactorGroup],
    ) -> Result<Assessed<ProfileMatchRanking>, SessionError> {
        let weights = self.weights()?;
        self.check_rows("profile matrix", raw, self.alternatives.len())?;
        if grouping.len() != self.criteria.len() {
            return Err(McdmError::ShapeMismatch {
                what: "factor grouping",
                expected: self.criteria.len(),
                got: grouping.len(),
            }
            .into());
        }
        self.check_ideal(ideal)?;

        let mut advisories = Vec::new();

        let (core, secondary) = group_weights(weights, grouping);
        let total = core + secondary;
        let share = if total > 0.0 { core / total } else { 0.0 };
        if share < self.config.min_core_factor_share {
            warn!(share, "core factor weight share below minimum");
            advisories.push(Advisory::CoreFactorShareTooLow {
                share,
                minimum: self.config.min_core_factor_share,
            });
        }

        let max_alts = self.config.max_profile_alternatives;
        let matrix = if raw.alternatives() > max_alts {
            let dropped = raw.alternatives() - max_alts;
            warn!(kept = max_alts, dropped, "too many alternatives for profile matching");
            advisories.push(Advisory::AlternativesTruncated {
                kept: max_alts,
                dropped,
            });
            raw.truncate_rows(max_alts)
        } else {
            raw.clone()
        };

        let (lo, hi) = (self.config.profile_scale_min, self.config.profile_scale_max);
        let (matrix, clipped) = clip_values(&matrix, Some(lo), hi);
        if clipped > 0 {
            warn!(count = clipped, lo, hi, "profile values clipped");
            advisories.push(Advisory::ValuesClipped {
                count: clipped,
                min: Some(lo),
                max: hi,
            });
        }

        let result = rank_by_profile_match(ideal, &matrix, weights, grouping)?;
        Ok(Assessed { result, advisories })
    }

    /// Alternatives that take part in Profile Matching.
    pub fn profile_alternatives(&self) -> &[String] {
        self.alternatives
            .truncated(self.config.max_profile_alternatives)
    }

    fn check_ideal(&self, ideal: &[u8]) -> Result<(), SessionError> {
        let (min, max) = (self.config.profile_scale_min, self.config.profile_scale_max);
        for (index, &value) in ideal.iter().enumerate() {
            let v = f64::from(value);
            if v < min || v > max {
                return Err(SessionError::IdealOutOfScale {
                    index,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    fn check_rows(
        &self,
        what: &'static str,
        matrix: &DecisionMatrix,
        expected: usize,
    ) -> Result<(), SessionError> {
        if matrix.alternatives() != expected {
            return Err(SessionError::AlternativeCountMismatch {
                what,
                expected,
                got: matrix.alternatives(),
            });
        }
        Ok(())
    }
}
