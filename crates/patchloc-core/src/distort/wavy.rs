use std::f32::consts::TAU;

use ndarray::Array2;

use super::bilinear_sample_reflect;

/// Wavy warp: sinusoidal remap where the horizontal displacement varies
/// with the row and the vertical displacement with the column.
pub fn wavy_distortion(region: &Array2<f32>, freq: f32, amp: f32) -> Array2<f32> {
    let (h, w) = region.dim();
    let mut out = Array2::<f32>::zeros((h, w));

    for y in 0..h {
        let wave_x = amp * (TAU * freq * y as f32 / h as f32).sin();
        for x in 0..w {
            let wave_y = amp * (TAU * freq * x as f32 / w as f32).sin();
            out[[y, x]] = bilinear_sample_reflect(region, y as f32 + wave_y, x as f32 + wave_x);
        }
    }

    out
}
