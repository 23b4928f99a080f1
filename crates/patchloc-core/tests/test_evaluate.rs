use patchloc_core::matching::{evaluate, PeakCandidate};

fn peak(row: usize, col: usize, strength: f64) -> PeakCandidate {
    PeakCandidate {
        row,
        col,
        strength,
        confidence: strength,
    }
}

#[test]
fn test_first_matching_peak_determines_rank() {
    // Template 10x10, ground truth at (55, 45): peak (50, 40) has its
    // centroid exactly on the ground truth.
    let peaks = vec![peak(0, 0, 1.0), peak(50, 40, 0.9), peak(50, 41, 0.8)];
    let rank = evaluate(&peaks, 10, 10, (45.0, 55.0), 25.0);
    assert_eq!(rank, Some(2));
}

#[test]
fn test_no_peak_within_threshold_yields_none() {
    let peaks = vec![peak(0, 0, 1.0), peak(80, 80, 0.5)];
    let rank = evaluate(&peaks, 10, 10, (45.0, 55.0), 25.0);
    assert_eq!(rank, None);
}

#[test]
fn test_threshold_is_strict() {
    // Centroid (25, 5), ground truth (5, 5): distance exactly 20.
    let peaks = vec![peak(0, 20, 1.0)];
    assert_eq!(evaluate(&peaks, 10, 10, (5.0, 5.0), 20.0), None);
    assert_eq!(evaluate(&peaks, 10, 10, (5.0, 5.0), 20.1), Some(1));
}

#[test]
fn test_shrinking_threshold_never_creates_a_match() {
    let peaks = vec![peak(10, 10, 1.0), peak(48, 38, 0.9)];
    let ground_truth = (45.0, 55.0);

    let mut previous_matched = true;
    for threshold in [25.0, 10.0, 5.0, 1.0] {
        let matched = evaluate(&peaks, 10, 10, ground_truth, threshold).is_some();
        assert!(
            previous_matched || !matched,
            "threshold {threshold} produced a match after a larger one did not"
        );
        previous_matched = matched;
    }
}

#[test]
fn test_empty_peak_list_yields_none() {
    assert_eq!(evaluate(&[], 10, 10, (5.0, 5.0), 25.0), None);
}
