use ndarray::{s, Array2};
use num_complex::Complex;
use rayon::prelude::*;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::error::{PatchlocError, Result};

/// How the cross-correlation surface is computed.
///
/// Both backends produce the same circular cross-correlation magnitudes;
/// `Fft` is O(N log N) and the only tractable choice for the benchmark
/// harness, `Direct` is the O(H·W·th·tw) sliding product kept for small
/// inputs and cross-checking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationBackend {
    #[default]
    Fft,
    Direct,
}

/// Compute the cross-correlation surface between `source` and `template`.
///
/// The surface has the source's dimensions regardless of template size: the
/// template's transform is zero-padded to the source's shape, so cell
/// (r, c) holds the correlation magnitude with the template's top-left
/// corner placed at that offset (wrapping circularly).
///
/// Inputs are expected to be normalized (zero mean, unit variance); see
/// [`crate::normalize::zero_mean_normalize`]. Fails with
/// `DimensionMismatch` when the template exceeds the source along any axis.
pub fn correlate(
    source: &Array2<f32>,
    template: &Array2<f32>,
    backend: CorrelationBackend,
) -> Result<Array2<f64>> {
    let (h, w) = source.dim();
    let (th, tw) = template.dim();
    if th > h || tw > w {
        return Err(PatchlocError::DimensionMismatch {
            source_w: w,
            source_h: h,
            template_w: tw,
            template_h: th,
        });
    }

    match backend {
        CorrelationBackend::Fft => Ok(correlate_fft(source, template)),
        CorrelationBackend::Direct => Ok(correlate_direct(source, template)),
    }
}

fn correlate_fft(source: &Array2<f32>, template: &Array2<f32>) -> Array2<f64> {
    let (h, w) = source.dim();
    let (th, tw) = template.dim();

    let src_fft = fft2d(source);

    // Zero-pad the template to the source's shape before transforming.
    let mut padded = Array2::<f32>::zeros((h, w));
    padded.slice_mut(s![..th, ..tw]).assign(template);
    let tpl_fft = fft2d(&padded);

    // Elementwise product with the template's conjugate is spatial
    // cross-correlation in the frequency domain.
    let mut product = Array2::<Complex<f64>>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            product[[row, col]] = src_fft[[row, col]] * tpl_fft[[row, col]].conj();
        }
    }

    ifft2d_magnitude(&product)
}

fn correlate_direct(source: &Array2<f32>, template: &Array2<f32>) -> Array2<f64> {
    let (h, w) = source.dim();
    let (th, tw) = template.dim();

    let rows: Vec<Vec<f64>> = (0..h)
        .into_par_iter()
        .map(|r| {
            (0..w)
                .map(|c| {
                    let mut sum = 0.0f64;
                    for i in 0..th {
                        let sr = (r + i) % h;
                        for j in 0..tw {
                            let sc = (c + j) % w;
                            sum += source[[sr, sc]] as f64 * template[[i, j]] as f64;
                        }
                    }
                    sum.abs()
                })
                .collect()
        })
        .collect();

    let mut result = Array2::<f64>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

/// 2D FFT: row-wise FFT, then column-wise FFT.
pub(crate) fn fft2d(data: &Array2<f32>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = Array2::<Complex<f64>>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            result[[row, col]] = Complex::new(data[[row, col]] as f64, 0.0);
        }
    }

    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| result[[row, c]]).collect();
        fft_row.process(&mut row_data);
        for col in 0..w {
            result[[row, col]] = row_data[col];
        }
    }

    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| result[[r, col]]).collect();
        fft_col.process(&mut col_data);
        for row in 0..h {
            result[[row, col]] = col_data[row];
        }
    }

    result
}

/// Inverse 2D FFT, returning the elementwise magnitude.
fn ifft2d_magnitude(data: &Array2<Complex<f64>>) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();

    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| work[[r, col]]).collect();
        ifft_col.process(&mut col_data);
        for row in 0..h {
            work[[row, col]] = col_data[row];
        }
    }

    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| work[[row, c]]).collect();
        ifft_row.process(&mut row_data);
        for col in 0..w {
            work[[row, col]] = row_data[col];
        }
    }

    let scale = 1.0 / (h * w) as f64;
    let mut result = Array2::<f64>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            result[[row, col]] = work[[row, col]].norm() * scale;
        }
    }

    result
}
