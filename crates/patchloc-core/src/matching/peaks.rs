use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// A local maximum on a correlation surface.
///
/// `confidence` is `strength` divided by the surface's global maximum, so
/// it lies in (0, 1] and is comparable across trials; the strongest peak on
/// any surface always has confidence 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeakCandidate {
    pub row: usize,
    pub col: usize,
    pub strength: f64,
    pub confidence: f64,
}

/// Extract up to `max_peaks` well-separated local maxima from a correlation
/// surface, strongest first.
///
/// A cell is a candidate when it equals the square maximum filter (side
/// `2 * min_distance + 1`) at that cell. Candidates are taken in descending
/// strength order, skipping any within Euclidean `min_distance` of an
/// already accepted peak, until `max_peaks` are accepted or candidates run
/// out.
///
/// When `fit_within` is `Some((template_h, template_w))`, peaks whose
/// template-sized bounding box would extend past the surface are discarded
/// before selection; partial-overlap correlation at the border inflates
/// apparent strength, so callers enabling this must enable it for every
/// surface they compare.
pub fn extract_peaks(
    surface: &Array2<f64>,
    min_distance: usize,
    max_peaks: usize,
    fit_within: Option<(usize, usize)>,
) -> Vec<PeakCandidate> {
    let (h, w) = surface.dim();
    if h == 0 || w == 0 || max_peaks == 0 {
        return Vec::new();
    }

    let filtered = maximum_filter(surface, min_distance);

    // Confidence is normalized by the global maximum of the whole surface,
    // not of the surviving candidates.
    let global_max = surface.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut candidates: Vec<(usize, usize, f64)> = Vec::new();
    for row in 0..h {
        for col in 0..w {
            if surface[[row, col]] != filtered[[row, col]] {
                continue;
            }
            if let Some((th, tw)) = fit_within {
                if row + th > h || col + tw > w {
                    continue;
                }
            }
            candidates.push((row, col, surface[[row, col]]));
        }
    }

    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut accepted: Vec<PeakCandidate> = Vec::with_capacity(max_peaks);
    'outer: for (row, col, strength) in candidates {
        if accepted.len() == max_peaks {
            break;
        }
        for kept in &accepted {
            let dr = row as f64 - kept.row as f64;
            let dc = col as f64 - kept.col as f64;
            if (dr * dr + dc * dc).sqrt() < min_distance as f64 {
                continue 'outer;
            }
        }
        accepted.push(PeakCandidate {
            row,
            col,
            strength,
            confidence: if global_max > 0.0 {
                strength / global_max
            } else {
                0.0
            },
        });
    }

    accepted
}

/// Square maximum filter of side `2 * radius + 1`, computed as two
/// separable sliding-max passes with edge clamping.
fn maximum_filter(data: &Array2<f64>, radius: usize) -> Array2<f64> {
    let row_pass = sliding_max_rows(data, radius);
    sliding_max_cols(&row_pass, radius)
}

fn sliding_max_rows(data: &Array2<f64>, radius: usize) -> Array2<f64> {
    let (h, w) = data.dim();

    let max_row = |row: usize| -> Vec<f64> {
        (0..w)
            .map(|col| {
                let lo = col.saturating_sub(radius);
                let hi = (col + radius).min(w - 1);
                (lo..=hi)
                    .map(|c| data[[row, c]])
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .collect()
    };

    let rows: Vec<Vec<f64>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(max_row).collect()
    } else {
        (0..h).map(max_row).collect()
    };

    collect_rows(rows, h, w)
}

fn sliding_max_cols(data: &Array2<f64>, radius: usize) -> Array2<f64> {
    let (h, w) = data.dim();

    let max_row = |row: usize| -> Vec<f64> {
        let lo = row.saturating_sub(radius);
        let hi = (row + radius).min(h - 1);
        (0..w)
            .map(|col| {
                (lo..=hi)
                    .map(|r| data[[r, col]])
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .collect()
    };

    let rows: Vec<Vec<f64>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(max_row).collect()
    } else {
        (0..h).map(max_row).collect()
    };

    collect_rows(rows, h, w)
}

fn collect_rows(rows: Vec<Vec<f64>>, h: usize, w: usize) -> Array2<f64> {
    let mut result = Array2::<f64>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
