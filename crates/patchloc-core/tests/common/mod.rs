#![allow(dead_code)]

use ndarray::Array2;

use patchloc_core::frame::Frame;

/// Deterministic textured frame: a hash of the pixel coordinates, scaled
/// to [0, 1). Non-periodic, so a crop matches exactly one location.
pub fn textured_frame(h: usize, w: usize) -> Frame {
    let data = Array2::from_shape_fn((h, w), |(r, c)| {
        let mut v = (r as u64)
            .wrapping_mul(6364136223846793005)
            .wrapping_add((c as u64).wrapping_mul(1442695040888963407));
        // Finalizing mix: without it the raw linear combination is
        // near-periodic along the diagonal, so a crop can alias.
        v ^= v >> 33;
        v = v.wrapping_mul(0xff51afd7ed558ccd);
        v ^= v >> 33;
        ((v >> 33) % 1000) as f32 / 1000.0
    });
    Frame::new(data)
}

pub fn uniform_frame(h: usize, w: usize, fill: f32) -> Frame {
    Frame::new(Array2::from_elem((h, w), fill))
}
