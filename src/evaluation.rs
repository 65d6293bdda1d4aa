//! Synthetic check of the random consistency index.
//!
//! Fills reciprocal matrices with uniformly drawn Saaty-scale judgments
//! (1/9 .. 9), runs the same weighting procedure, and averages the
//! consistency index. The averages should track [`crate::ahp::RANDOM_INDEX`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::ahp::{compute_weights, random_index};
use crate::error::McdmError;
use crate::matrix::{Favored, PairwiseMatrix};

#[derive(Debug, Clone, Serialize)]
pub struct RandomIndexEstimate {
    pub n: usize,
    pub samples: usize,
    pub seed: u64,
    pub estimated: f64,
    /// Saaty table value for comparison.
    pub reference: f64,
}

/// A reciprocal matrix with every upper-triangle judgment drawn at random.
pub fn random_pairwise_matrix(n: usize, rng: &mut impl Rng) -> Result<PairwiseMatrix, McdmError> {
    let mut matrix = PairwiseMatrix::identity(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let intensity: u8 = rng.gen_range(1..=9);
            let favored = if rng.gen_bool(0.5) {
                Favored::First
            } else {
                Favored::Second
            };
            matrix.record(i, j, favored, intensity)?;
        }
    }
    Ok(matrix)
}

/// Mean consistency index over `samples` random `n`×`n` matrices.
pub fn estimate_random_index(
    n: usize,
    samples: usize,
    seed: u64,
) -> Result<RandomIndexEstimate, McdmError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut total = 0.0;
    for _ in 0..samples {
        let matrix = random_pairwise_matrix(n, &mut rng)?;
        total += compute_weights(&matrix)?.consistency_index;
    }
    let estimated = if samples > 0 {
        total / samples as f64
    } else {
        0.0
    };
    Ok(RandomIndexEstimate {
        n,
        samples,
        seed,
        estimated,
        reference: random_index(n),
    })
}

/// Estimates for every size in `sizes`, each with its own derived seed.
pub fn run_random_index_suite(
    sizes: &[usize],
    samples: usize,
    seed: u64,
) -> Result<Vec<RandomIndexEstimate>, McdmError> {
    sizes
        .iter()
        .map(|&n| estimate_random_index(n, samples, seed.wrapping_add(n as u64)))
        .collect()
}
