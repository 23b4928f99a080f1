use super::peaks::PeakCandidate;

/// Find the rank of the first peak whose detection centroid lies within
/// `distance_threshold` of the ground-truth centroid.
///
/// A peak's location is the top-left corner of the template placement, so
/// its centroid is `(col + template_w/2, row + template_h/2)`. Peaks are
/// checked in the given (descending-confidence) order and only the first
/// qualifying peak counts; the returned rank is 1-based. `None` means the
/// correct location was not found.
pub fn evaluate(
    peaks: &[PeakCandidate],
    template_h: usize,
    template_w: usize,
    ground_truth: (f64, f64),
    distance_threshold: f64,
) -> Option<usize> {
    for (i, peak) in peaks.iter().enumerate() {
        let cx = peak.col as f64 + template_w as f64 / 2.0;
        let cy = peak.row as f64 + template_h as f64 / 2.0;
        let dx = cx - ground_truth.0;
        let dy = cy - ground_truth.1;
        if (dx * dx + dy * dy).sqrt() < distance_threshold {
            return Some(i + 1);
        }
    }
    None
}
