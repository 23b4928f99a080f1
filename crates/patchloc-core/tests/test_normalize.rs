mod common;

use approx::assert_abs_diff_eq;

use patchloc_core::error::PatchlocError;
use patchloc_core::normalize::zero_mean_normalize;

use common::{textured_frame, uniform_frame};

fn mean_and_std(data: &ndarray::Array2<f32>) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = data
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}

#[test]
fn test_normalized_has_zero_mean_unit_std() {
    let frame = textured_frame(32, 48);
    let normalized = zero_mean_normalize(&frame.data).unwrap();

    let (mean, std) = mean_and_std(&normalized);
    assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(std, 1.0, epsilon = 1e-4);
}

#[test]
fn test_normalization_is_idempotent() {
    let frame = textured_frame(16, 16);
    let once = zero_mean_normalize(&frame.data).unwrap();
    let twice = zero_mean_normalize(&once).unwrap();

    for (a, b) in once.iter().zip(twice.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-4);
    }
}

#[test]
fn test_uniform_image_is_rejected() {
    let frame = uniform_frame(8, 8, 0.5);
    let err = zero_mean_normalize(&frame.data).unwrap_err();
    assert!(matches!(err, PatchlocError::DegenerateInput(_)));
}
