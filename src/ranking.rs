//! Ranking helpers shared by TOPSIS and Profile Matching.

use serde::{Deserialize, Serialize};

/// Ordering of alternatives by descending score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// Alternative indices, best first.
    pub order: Vec<usize>,
    /// 1-based rank of each alternative, in input order.
    pub ranks: Vec<usize>,
}

impl Ranking {
    /// Sorts by descending score. Equal scores keep input order.
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        // sort_by is stable
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        let mut ranks = vec![0; scores.len()];
        for (pos, &idx) in order.iter().enumerate() {
            ranks[idx] = pos + 1;
        }
        Self { order, ranks }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Index of the rank-1 alternative.
    pub fn best(&self) -> Option<usize> {
        self.order.first().copied()
    }
}

/// Rank correlation between two score vectors over the same alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankAgreement {
    pub kendall_tau: f64,
    pub spearman_rho: f64,
    pub same_winner: bool,
}

/// Compares two score vectors. Returns `None` when lengths differ.
pub fn rank_agreement(a: &[f64], b: &[f64]) -> Option<RankAgreement> {
    if a.len() != b.len() {
        return None;
    }
    let same_winner = Ranking::from_scores(a).best() == Ranking::from_scores(b).best();
    Some(RankAgreement {
        kendall_tau: kendall_tau_b(a, b),
        spearman_rho: spearman_rho(a, b),
        same_winner,
    })
}

/// Positions of each alternative under [`Ranking::from_scores`], with tied
/// alternatives sharing the mean of the positions they span.
pub fn mid_ranks(scores: &[f64]) -> Vec<f64> {
    let order = Ranking::from_scores(scores).order;
    let mut mid = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let lead = scores[order[start]];
        let end = order[start..]
            .iter()
            .position(|&idx| scores[idx].total_cmp(&lead).is_ne())
            .map_or(order.len(), |offset| start + offset);
        // positions start+1 ..= end
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            mid[idx] = shared;
        }
        start = end;
    }
    mid
}

/// Kendall's tau-b over the two rankings. 0.0 when undefined.
pub fn kendall_tau_b(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return 0.0;
    }
    let (ra, rb) = (mid_ranks(a), mid_ranks(b));

    // net = concordant - discordant; untied_* count pairs separated in each ranking
    let (mut net, mut untied_a, mut untied_b) = (0i64, 0u64, 0u64);
    for i in 0..ra.len() {
        for j in (i + 1)..ra.len() {
            let oa = ra[i].total_cmp(&ra[j]);
            let ob = rb[i].total_cmp(&rb[j]);
            untied_a += u64::from(oa.is_ne());
            untied_b += u64::from(ob.is_ne());
            if oa.is_ne() && ob.is_ne() {
                net += if oa == ob { 1 } else { -1 };
            }
        }
    }

    let denom = ((untied_a * untied_b) as f64).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        net as f64 / denom
    }
}

/// Spearman's rho: Pearson correlation of the two mid-rank vectors. 0.0 when undefined.
pub fn spearman_rho(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return 0.0;
    }
    let (ra, rb) = (mid_ranks(a), mid_ranks(b));
    // every mid-rank vector over n items averages (n + 1) / 2
    let centre = (ra.len() + 1) as f64 / 2.0;

    let (cov, var_a, var_b) = ra.iter().zip(&rb).fold((0.0, 0.0, 0.0), |(c, va, vb), (x, y)| {
        let (dx, dy) = (x - centre, y - centre);
        (c + dx * dy, va + dx * dx, vb + dy * dy)
    });
    if var_a == 0.0 || var_b == 0.0 {
        0.0
    } else {
        cov / (var_a * var_b).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_orders_descending_and_keeps_ties_stable() {
        let r = Ranking::from_scores(&[0.2, 0.9, 0.2, 0.5]);
        assert_eq!(r.order, vec![1, 3, 0, 2]);
        assert_eq!(r.ranks, vec![3, 1, 4, 2]);
        assert_eq!(r.best(), Some(1));
    }

    #[test]
    fn all_equal_scores_keep_input_order() {
        let r = Ranking::from_scores(&[4.4, 4.4, 4.4]);
        assert_eq!(r.order, vec![0, 1, 2]);
        assert_eq!(r.ranks, vec![1, 2, 3]);
    }

    #[test]
    fn tied_alternatives_share_mid_rank() {
        assert_eq!(mid_ranks(&[0.2, 0.9, 0.2, 0.5]), vec![3.5, 1.0, 3.5, 2.0]);
        assert_eq!(mid_ranks(&[1.0, 1.0, 1.0]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn ties_shrink_kendall_denominator() {
        // one tied pair in the first ranking, none in the second
        let tau = kendall_tau_b(&[3.0, 3.0, 1.0], &[3.0, 2.0, 1.0]);
        assert!((tau - 2.0 / 6f64.sqrt()).abs() < 1e-12);
        assert_eq!(spearman_rho(&[1.0, 1.0], &[2.0, 1.0]), 0.0);
    }

    #[test]
    fn agreement_of_identical_and_reversed_orders() {
        let a = [0.9, 0.5, 0.1];
        let same = rank_agreement(&a, &[3.0, 2.0, 1.0]).unwrap();
        assert!((same.kendall_tau - 1.0).abs() < 1e-12);
        assert!((same.spearman_rho - 1.0).abs() < 1e-12);
        assert!(same.same_winner);

        let reversed = rank_agreement(&a, &[1.0, 2.0, 3.0]).unwrap();
        assert!((reversed.kendall_tau + 1.0).abs() < 1e-12);
        assert!((reversed.spearman_rho + 1.0).abs() < 1e-12);
        assert!(!reversed.same_winner);

        assert!(rank_agreement(&a, &[1.0]).is_none());
    }
}
