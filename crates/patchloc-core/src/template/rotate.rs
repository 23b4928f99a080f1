use ndarray::Array2;

/// Rotate an image about its center by `angle_deg` (counter-clockwise),
/// keeping the canvas size fixed.
///
/// Each destination pixel is inverse-mapped into the source and sampled
/// bilinearly; samples falling outside the source are filled with zero.
/// The fixed canvas means corners rotated out of frame are lost and the
/// fill introduces border artifacts, which downstream crop rejection
/// handles.
pub fn rotate_about_center(src: &Array2<f32>, angle_deg: f32) -> Array2<f32> {
    let (h, w) = src.dim();
    let mut out = Array2::<f32>::zeros((h, w));

    let theta = (angle_deg as f64).to_radians();
    let (sin_a, cos_a) = theta.sin_cos();
    let cx = (w as f64 - 1.0) * 0.5;
    let cy = (h as f64 - 1.0) * 0.5;
    let max_x = w as f64 - 1.0;
    let max_y = h as f64 - 1.0;

    for y in 0..h {
        for x in 0..w {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let src_x = cos_a * dx + sin_a * dy + cx;
            let src_y = -sin_a * dx + cos_a * dy + cy;

            if src_x < 0.0 || src_y < 0.0 || src_x > max_x || src_y > max_y {
                continue;
            }

            let x0 = src_x.floor() as usize;
            let y0 = src_y.floor() as usize;
            let x1 = (x0 + 1).min(w - 1);
            let y1 = (y0 + 1).min(h - 1);
            let fx = (src_x - x0 as f64) as f32;
            let fy = (src_y - y0 as f64) as f32;

            let v00 = src[[y0, x0]];
            let v10 = src[[y0, x1]];
            let v01 = src[[y1, x0]];
            let v11 = src[[y1, x1]];

            out[[y, x]] = v00 * (1.0 - fx) * (1.0 - fy)
                + v10 * fx * (1.0 - fy)
                + v01 * (1.0 - fx) * fy
                + v11 * fx * fy;
        }
    }

    out
}
