//! JSON problem documents and the offline end-to-end run.
//!
//! A [`DecisionProblem`] describes one site-selection exercise: names,
//! pairwise judgments, and optional TOPSIS / Profile Matching inputs.
//! [`run_problem`] executes it through a [`DecisionSession`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ahp::WeightingResult;
use crate::config::DecisionConfig;
use crate::error::McdmError;
use crate::matrix::{DecisionMatrix, PairwiseMatrix};
use crate::profile_matching::ProfileMatchRanking;
use crate::ranking::{rank_agreement, RankAgreement};
use crate::session::{Assessed, DecisionSession, NamedComparison, SessionError};
use crate::topsis::DistanceRanking;
use crate::types::{AlternativeSet, CriterionSet, FactorGroup, NameError, Polarity};

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("invalid problem JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Mcdm(#[from] McdmError),
    #[error("give either `comparisons` or `pairwise_matrix`, not both")]
    ConflictingJudgments,
}

/// TOPSIS inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceInput {
    pub polarity: Vec<Polarity>,
    /// One row per alternative, raw values (capped at the configured maximum).
    pub matrix: Vec<Vec<f64>>,
}

/// Profile Matching inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub ideal: Vec<u8>,
    pub grouping: Vec<FactorGroup>,
    /// One row per alternative, raw values (clipped to the profile scale).
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionProblem {
    pub criteria: Vec<String>,
    pub alternatives: Vec<String>,
    /// Named judgments; unmentioned pairs are equally important.
    #[serde(default)]
    pub comparisons: Vec<NamedComparison>,
    /// Full pairwise matrix, used instead of `comparisons`.
    #[serde(default)]
    pub pairwise_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub distance: Option<DistanceInput>,
    #[serde(default)]
    pub profile: Option<ProfileInput>,
}

impl DecisionProblem {
    pub fn from_json_str(raw: &str) -> Result<Self, ProblemError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Profile Matching result with the names of the alternatives it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOutcome {
    pub alternatives: Vec<String>,
    /// CF/SF tag per criterion, in criterion order.
    pub grouping: Vec<FactorGroup>,
    #[serde(flatten)]
    pub assessed: Assessed<ProfileMatchRanking>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemOutcome {
    pub criteria: Vec<String>,
    pub alternatives: Vec<String>,
    pub weighting: Assessed<WeightingResult>,
    pub distance: Option<Assessed<DistanceRanking>>,
    pub profile: Option<ProfileOutcome>,
    /// Agreement of TOPSIS and Profile Matching over the alternatives both ranked.
    pub agreement: Option<RankAgreement>,
}

fn build_session(
    problem: &DecisionProblem,
    config: DecisionConfig,
) -> Result<DecisionSession, ProblemError> {
    let criteria = CriterionSet::new(problem.criteria.iter().cloned())?;
    let alternatives = AlternativeSet::new(problem.alternatives.iter().cloned())?;
    Ok(DecisionSession::new(criteria, alternatives, config))
}

fn pairwise_for(
    problem: &DecisionProblem,
    session: &DecisionSession,
) -> Result<PairwiseMatrix, ProblemError> {
    match &problem.pairwise_matrix {
        Some(_) if !problem.comparisons.is_empty() => Err(ProblemError::ConflictingJudgments),
        Some(rows) => Ok(PairwiseMatrix::from_rows(rows)?),
        None => Ok(session.pairwise_from_comparisons(&problem.comparisons)?),
    }
}

/// Weighting only.
pub fn weigh_problem(
    problem: &DecisionProblem,
    config: DecisionConfig,
) -> Result<Assessed<WeightingResult>, ProblemError> {
    let mut session = build_session(problem, config)?;
    let pairwise = pairwise_for(problem, &session)?;
    Ok(session.weigh(&pairwise)?)
}

/// Weighting followed by whichever rankers the problem configures.
pub fn run_problem(
    problem: &DecisionProblem,
    config: DecisionConfig,
) -> Result<ProblemOutcome, ProblemError> {
    let mut session = build_session(problem, config)?;
    let pairwise = pairwise_for(problem, &session)?;
    let weighting = session.weigh(&pairwise)?;

    let distance = match &problem.distance {
        Some(input) => {
            let matrix = DecisionMatrix::from_rows(&input.matrix)?;
            Some(session.rank_by_distance(&matrix, &input.polarity)?)
        }
        None => None,
    };

    let profile = match &problem.profile {
        Some(input) => {
            let matrix = DecisionMatrix::from_rows(&input.matrix)?;
            let assessed = session.rank_by_profile_match(&input.ideal, &matrix, &input.grouping)?;
            Some(ProfileOutcome {
                alternatives: session.profile_alternatives().to_vec(),
                grouping: input.grouping.clone(),
                assessed,
            })
        }
        None => None,
    };

    let agreement = match (&distance, &profile) {
        (Some(d), Some(p)) => {
            let k = p.assessed.result.scores.len();
            rank_agreement(&d.result.scores[..k], &p.assessed.result.scores)
        }
        _ => None,
    };

    Ok(ProblemOutcome {
        criteria: session.criteria().names().to_vec(),
        alternatives: session.alternatives().names().to_vec(),
        weighting,
        distance,
        profile,
        agreement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COFFEE: &str = r#"{
        "criteria": ["Rent", "Foot traffic", "Parking"],
        "alternatives": ["Malioboro", "Sleman", "Kotagede"],
        "comparisons": [
            {"more_important": "Foot traffic", "less_important": "Rent", "intensity": 3},
            {"more_important": "Foot traffic", "less_important": "Parking", "intensity": 5},
            {"more_important": "Rent", "less_important": "Parking", "intensity": 2}
        ],
        "distance": {
            "polarity": ["cost", "benefit", "benefit"],
            "matrix": [[9, 10, 3], [4, 6, 8], [6, 7, 5]]
        },
        "profile": {
            "ideal": [3, 5, 4],
            "grouping": ["sf", "cf", "sf"],
            "matrix": [[5, 5, 2], [2, 3, 4], [3, 4, 4]]
        }
    }"#;

    #[test]
    fn runs_full_pipeline() {
        let problem = DecisionProblem::from_json_str(COFFEE).unwrap();
        let out = run_problem(&problem, DecisionConfig::default()).unwrap();

        let w = &out.weighting.result.weights;
        assert_eq!(w.len(), 3);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(w[1] > w[0] && w[0] > w[2]);

        let distance = out.distance.unwrap();
        assert_eq!(distance.result.scores.len(), 3);
        let profile = out.profile.unwrap();
        assert_eq!(profile.alternatives.len(), 3);
        assert_eq!(
            profile.grouping,
            vec![FactorGroup::SecondaryFactor, FactorGroup::CoreFactor, FactorGroup::SecondaryFactor]
        );
        assert!(out.agreement.is_some());
    }

    #[test]
    fn rejects_conflicting_judgments() {
        let mut problem = DecisionProblem::from_json_str(COFFEE).unwrap();
        problem.pairwise_matrix = Some(vec![vec![1.0; 3]; 3]);
        assert!(matches!(
            weigh_problem(&problem, DecisionConfig::default()),
            Err(ProblemError::ConflictingJudgments)
        ));
    }

    #[test]
    fn explicit_pairwise_matrix_is_used() {
        let mut problem = DecisionProblem::from_json_str(COFFEE).unwrap();
        problem.comparisons.clear();
        problem.pairwise_matrix = Some(vec![vec![1.0; 3]; 3]);
        let out = weigh_problem(&problem, DecisionConfig::default()).unwrap();
        for w in &out.result.weights {
            assert!((w - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn duplicate_criteria_are_rejected() {
        let mut problem = DecisionProblem::from_json_str(COFFEE).unwrap();
        problem.criteria[2] = "Rent".to_string();
        assert!(matches!(
            run_problem(&problem, DecisionConfig::default()),
            Err(ProblemError::Name(NameError::Duplicate { .. }))
        ));
    }
}
