//! Shared vocabulary: named criteria/alternatives and per-criterion tags.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a higher raw value is better (Benefit) or worse (Cost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Benefit,
    Cost,
}

impl Polarity {
    pub fn is_benefit(self) -> bool {
        matches!(self, Polarity::Benefit)
    }
}

/// Profile Matching factor group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorGroup {
    #[serde(alias = "cf", alias = "CF")]
    CoreFactor,
    #[serde(alias = "sf", alias = "SF")]
    SecondaryFactor,
}

impl FactorGroup {
    pub fn is_core(self) -> bool {
        matches!(self, FactorGroup::CoreFactor)
    }

    /// Two-letter tag used in tables.
    pub fn short(self) -> &'static str {
        match self {
            FactorGroup::CoreFactor => "CF",
            FactorGroup::SecondaryFactor => "SF",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("{kind} {position} has an empty name")]
    Empty { kind: &'static str, position: usize },
    #[error("duplicate {kind} name: {name}")]
    Duplicate { kind: &'static str, name: String },
    #[error("at least {min} {kind}s are required, got {got}")]
    TooFew {
        kind: &'static str,
        min: usize,
        got: usize,
    },
}

fn clean_names(
    names: impl IntoIterator<Item = impl Into<String>>,
    kind: &'static str,
) -> Result<Vec<String>, NameError> {
    let mut out: Vec<String> = Vec::new();
    for (idx, raw) in names.into_iter().enumerate() {
        let name = raw.into().trim().to_string();
        if name.is_empty() {
            return Err(NameError::Empty {
                kind,
                position: idx + 1,
            });
        }
        out.push(name);
    }
    if out.len() < 2 {
        return Err(NameError::TooFew {
            kind,
            min: 2,
            got: out.len(),
        });
    }
    Ok(out)
}

/// Ordered criterion names. Order is the column order of every matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CriterionSet(Vec<String>);

impl CriterionSet {
    /// Trims names and requires at least two distinct, non-empty entries.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Result<Self, NameError> {
        let names = clean_names(names, "criterion")?;
        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(NameError::Duplicate {
                    kind: "criterion",
                    name: name.clone(),
                });
            }
        }
        Ok(Self(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.0.iter().position(|n| n == name)
    }
}

/// Ordered alternative (candidate site) names. Order is the row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AlternativeSet(Vec<String>);

impl AlternativeSet {
    /// Trims names and requires at least two non-empty entries.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Result<Self, NameError> {
        Ok(Self(clean_names(names, "alternative")?))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// First `max` alternatives.
    pub fn truncated(&self, max: usize) -> &[String] {
        &self.0[..self.0.len().min(max)]
    }
}
