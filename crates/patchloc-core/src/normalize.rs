use ndarray::Array2;

use crate::consts::ZERO_VARIANCE_EPSILON;
use crate::error::{PatchlocError, Result};

/// Rescale an image to zero mean and unit variance.
///
/// A uniform-intensity input has no meaningful normalization and would
/// divide by zero; it is rejected as `DegenerateInput` so the error never
/// reaches the correlation stage as NaN.
pub fn zero_mean_normalize(data: &Array2<f32>) -> Result<Array2<f32>> {
    let n = data.len();
    if n == 0 {
        return Err(PatchlocError::DegenerateInput("empty image".into()));
    }

    let mean = data.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let variance = data
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n as f64;

    if variance < ZERO_VARIANCE_EPSILON {
        return Err(PatchlocError::DegenerateInput(
            "zero-variance (uniform) image".into(),
        ));
    }

    let std = variance.sqrt();
    Ok(data.mapv(|v| ((v as f64 - mean) / std) as f32))
}
