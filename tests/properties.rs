use proptest::prelude::*;

use sitewise::{
    compute_weights, gap_score, rank_by_distance, rank_by_profile_match, DecisionMatrix, Favored,
    FactorGroup, PairwiseMatrix, Polarity,
};

fn judgments() -> impl Strategy<Value = (usize, Vec<(bool, u8)>)> {
    (2usize..8).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        (Just(n), prop::collection::vec((any::<bool>(), 1u8..=9), pairs))
    })
}

fn pairwise(n: usize, judgments: &[(bool, u8)]) -> PairwiseMatrix {
    let mut m = PairwiseMatrix::identity(n);
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let (first, intensity) = judgments[k];
            let favored = if first { Favored::First } else { Favored::Second };
            m.record(i, j, favored, intensity).unwrap();
            k += 1;
        }
    }
    m
}

fn decision_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (2usize..8, 2usize..6).prop_flat_map(|(alts, crit)| {
        prop::collection::vec(prop::collection::vec(0.0..10.0f64, crit), alts)
    })
}

fn is_permutation(ranks: &[usize]) -> bool {
    let mut sorted = ranks.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, r)| *r == i + 1)
}

proptest! {
    #[test]
    fn reciprocal_matrices_yield_normalized_weights((n, js) in judgments()) {
        let out = compute_weights(&pairwise(n, &js)).unwrap();
        prop_assert_eq!(out.weights.len(), n);
        prop_assert!((out.weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        prop_assert!(out.weights.iter().all(|w| *w > 0.0));
    }

    #[test]
    fn distance_ranking_is_bounded_permutation(rows in decision_rows(), flip in any::<bool>()) {
        let m = DecisionMatrix::from_rows(&rows).unwrap();
        let crit = m.criteria();
        let weights = vec![1.0 / crit as f64; crit];
        let polarity: Vec<Polarity> = (0..crit)
            .map(|c| if (c % 2 == 0) ^ flip { Polarity::Benefit } else { Polarity::Cost })
            .collect();

        let out = rank_by_distance(&m, &weights, &polarity).unwrap();
        prop_assert!(is_permutation(&out.ranking.ranks));
        prop_assert!(out.scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn profile_scores_stay_on_scale(rows in decision_rows(), core in any::<bool>()) {
        let rows: Vec<Vec<f64>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(|v| (v / 2.5).round() + 1.0).collect())
            .collect();
        let m = DecisionMatrix::from_rows(&rows).unwrap();
        let crit = m.criteria();
        let weights = vec![1.0 / crit as f64; crit];
        let mut grouping = vec![FactorGroup::SecondaryFactor; crit];
        grouping[0] = if core { FactorGroup::CoreFactor } else { FactorGroup::SecondaryFactor };
        let ideal = vec![3u8; crit];

        let out = rank_by_profile_match(&ideal, &m, &weights, &grouping).unwrap();
        prop_assert!(is_permutation(&out.ranking.ranks));
        for s in &out.scores {
            prop_assert!(*s >= 0.0 && *s <= 5.0 + 1e-9);
        }
    }

    #[test]
    fn gap_score_is_symmetric(gap in -8i32..8) {
        let g = f64::from(gap);
        prop_assert_eq!(gap_score(g), gap_score(-g));
    }
}
