#![forbid(unsafe_code)]

//! # sitewise
//!
//! Multi-criteria site selection: AHP derives criterion weights from
//! pairwise judgments, then TOPSIS and gap-based Profile Matching rank the
//! candidate sites with those weights.
//!
//! The three procedures ([`compute_weights`], [`rank_by_distance`],
//! [`rank_by_profile_match`]) are pure functions over borrowed inputs.
//! [`DecisionSession`] is the caller-side context that caches the weights
//! between steps and applies the input clipping and advisories.

pub mod ahp;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod matrix;
pub mod problem;
pub mod profile_matching;
pub mod ranking;
pub mod report;
pub mod session;
pub mod topsis;
pub mod types;

pub use ahp::{compute_weights, WeightingResult};
pub use config::{load_config_from_path, ConfigError, DecisionConfig};
pub use error::McdmError;
pub use matrix::{DecisionMatrix, Favored, PairwiseMatrix};
pub use problem::{run_problem, DecisionProblem, ProblemError, ProblemOutcome};
pub use profile_matching::{gap_score, rank_by_profile_match, ProfileMatchRanking};
pub use ranking::{RankAgreement, Ranking};
pub use session::{Advisory, Assessed, DecisionSession, NamedComparison, SessionError};
pub use topsis::{rank_by_distance, DistanceRanking};
pub use types::{AlternativeSet, CriterionSet, FactorGroup, NameError, Polarity};
