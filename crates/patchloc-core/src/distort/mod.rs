pub mod elastic;
pub mod wavy;

use ndarray::{s, Array2};
use rand::Rng;

use crate::consts::{DISTORTION_REGION_COUNT, MIN_DISTORTION_REGION_SPAN};
use crate::frame::Frame;

use elastic::elastic_transform;
use wavy::wavy_distortion;

/// Apply randomized local warps to simulate imaging noise.
///
/// [`DISTORTION_REGION_COUNT`] rectangular regions are drawn at random and
/// each is warped in place by either an elastic or a wavy transform, both
/// parameterized by `level`. Level 0 is the identity. Images too small to
/// fit a region (under 2x the minimum span per axis) are returned
/// unchanged.
pub fn apply_random_distortion<R: Rng>(frame: &Frame, level: u32, rng: &mut R) -> Frame {
    let (rows, cols) = frame.data.dim();
    let mut data = frame.data.clone();

    if level == 0
        || rows < 2 * MIN_DISTORTION_REGION_SPAN
        || cols < 2 * MIN_DISTORTION_REGION_SPAN
    {
        return Frame::new(data);
    }

    for _ in 0..DISTORTION_REGION_COUNT {
        let x_start = rng.random_range(0..cols / 2);
        let x_end = rng.random_range(x_start + MIN_DISTORTION_REGION_SPAN..cols);
        let y_start = rng.random_range(0..rows / 2);
        let y_end = rng.random_range(y_start + MIN_DISTORTION_REGION_SPAN..rows);

        let region = data.slice(s![y_start..y_end, x_start..x_end]).to_owned();
        let warped = if rng.random_bool(0.5) {
            let alpha = level as f32 * 10.0;
            let sigma = level as f32 * 2.0;
            elastic_transform(&region, alpha, sigma, rng)
        } else {
            let freq = level as f32;
            let amp = level as f32 * 0.5;
            wavy_distortion(&region, freq, amp)
        };
        data.slice_mut(s![y_start..y_end, x_start..x_end]).assign(&warped);
    }

    Frame::new(data)
}

/// Bilinear sample with reflected borders (edge pixels duplicated).
pub(crate) fn bilinear_sample_reflect(data: &Array2<f32>, y: f32, x: f32) -> f32 {
    let (h, w) = data.dim();

    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let sample = |r: isize, c: isize| -> f32 {
        data[[reflect_index(r, h), reflect_index(c, w)]]
    };

    let v00 = sample(y0, x0);
    let v10 = sample(y0, x0 + 1);
    let v01 = sample(y0 + 1, x0);
    let v11 = sample(y0 + 1, x0 + 1);

    v00 * (1.0 - fx) * (1.0 - fy)
        + v10 * fx * (1.0 - fy)
        + v01 * (1.0 - fx) * fy
        + v11 * fx * fy
}

fn reflect_index(idx: isize, n: usize) -> usize {
    let n = n as isize;
    if n == 1 {
        return 0;
    }
    let period = 2 * n;
    let mut i = idx % period;
    if i < 0 {
        i += period;
    }
    if i >= n {
        i = period - 1 - i;
    }
    i as usize
}
