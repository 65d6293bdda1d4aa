use sitewise::ahp::{compute_weights, random_index, CONSISTENCY_THRESHOLD};
use sitewise::{Favored, McdmError, PairwiseMatrix};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn weights_sum_to_one_and_are_non_negative() {
    let mut m = PairwiseMatrix::identity(5);
    m.record(0, 1, Favored::First, 7).unwrap();
    m.record(0, 4, Favored::Second, 2).unwrap();
    m.record(2, 3, Favored::First, 9).unwrap();
    m.record(1, 3, Favored::Second, 4).unwrap();

    let out = compute_weights(&m).unwrap();
    assert_eq!(out.weights.len(), 5);
    assert!(approx_eq(out.weights.iter().sum::<f64>(), 1.0, 1e-9));
    assert!(out.weights.iter().all(|w| *w >= 0.0));
}

#[test]
fn two_criteria_always_have_zero_ratio() {
    for intensity in 1..=9 {
        let mut m = PairwiseMatrix::identity(2);
        m.record(0, 1, Favored::Second, intensity).unwrap();
        let out = compute_weights(&m).unwrap();
        assert_eq!(out.random_index, 0.0);
        assert_eq!(out.consistency_ratio, 0.0);
        let v = f64::from(intensity);
        assert!(approx_eq(out.weights[1], v / (v + 1.0), 1e-12));
    }
}

#[test]
fn ratio_scale_matrix_is_perfectly_consistent() {
    let truth = [4.0, 2.0, 1.0, 0.5];
    let m = PairwiseMatrix::from_priorities(&truth).unwrap();
    let out = compute_weights(&m).unwrap();

    let total: f64 = truth.iter().sum();
    for (w, v) in out.weights.iter().zip(truth) {
        assert!(approx_eq(*w, v / total, 1e-12));
    }
    assert!(approx_eq(out.lambda_max, 4.0, 1e-9));
    assert!(out.consistency_ratio.abs() < 1e-9);
    assert!(out.is_consistent(CONSISTENCY_THRESHOLD));
}

#[test]
fn contradictory_judgments_exceed_threshold() {
    // 0 > 1 strongly, 1 > 2 strongly, yet 2 > 0 strongly
    let mut m = PairwiseMatrix::identity(3);
    m.record(0, 1, Favored::First, 9).unwrap();
    m.record(1, 2, Favored::First, 9).unwrap();
    m.record(0, 2, Favored::Second, 9).unwrap();

    let out = compute_weights(&m).unwrap();
    assert!(approx_eq(out.weights.iter().sum::<f64>(), 1.0, 1e-9));
    assert!(out.consistency_ratio > CONSISTENCY_THRESHOLD);
    assert!(!out.is_consistent(CONSISTENCY_THRESHOLD));
}

#[test]
fn large_matrices_use_last_random_index() {
    let m = PairwiseMatrix::identity(12);
    let out = compute_weights(&m).unwrap();
    assert_eq!(out.random_index, random_index(10));
    assert!(approx_eq(out.weights[0], 1.0 / 12.0, 1e-12));
}

#[test]
fn zero_column_fails_explicitly() {
    let m = PairwiseMatrix::from_rows(&[
        vec![1.0, 2.0, 0.0],
        vec![0.5, 1.0, 0.0],
        vec![3.0, 1.0, 0.0],
    ])
    .unwrap();
    let err = compute_weights(&m).unwrap_err();
    assert_eq!(err, McdmError::ZeroColumnSum { column: 2 });
    assert!(err.is_degenerate());
}
