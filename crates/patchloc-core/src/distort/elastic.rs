use ndarray::Array2;
use rand::Rng;

use crate::filters::gaussian_blur::gaussian_blur_array;

use super::bilinear_sample_reflect;

/// Elastic warp: a random displacement field, smoothed by a Gaussian of
/// width `sigma` and scaled by `alpha`, resampled bilinearly with reflected
/// borders.
pub fn elastic_transform<R: Rng>(
    region: &Array2<f32>,
    alpha: f32,
    sigma: f32,
    rng: &mut R,
) -> Array2<f32> {
    let (h, w) = region.dim();

    let mut dx = Array2::<f32>::zeros((h, w));
    let mut dy = Array2::<f32>::zeros((h, w));
    for v in dx.iter_mut() {
        *v = rng.random_range(-1.0..1.0);
    }
    for v in dy.iter_mut() {
        *v = rng.random_range(-1.0..1.0);
    }
    let dx = gaussian_blur_array(&dx, sigma).mapv(|v| v * alpha);
    let dy = gaussian_blur_array(&dy, sigma).mapv(|v| v * alpha);

    let mut out = Array2::<f32>::zeros((h, w));
    for y in 0..h {
        for x in 0..w {
            let src_y = y as f32 + dy[[y, x]];
            let src_x = x as f32 + dx[[y, x]];
            out[[y, x]] = bilinear_sample_reflect(region, src_y, src_x);
        }
    }

    out
}
