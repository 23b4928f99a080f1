mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;

use patchloc_core::distort::apply_random_distortion;

use common::textured_frame;

#[test]
fn test_level_zero_is_identity() {
    let frame = textured_frame(64, 64);
    let mut rng = StdRng::seed_from_u64(3);

    let distorted = apply_random_distortion(&frame, 0, &mut rng);
    assert_eq!(distorted.data, frame.data);
}

#[test]
fn test_tiny_image_passes_through_unchanged() {
    let frame = textured_frame(12, 12);
    let mut rng = StdRng::seed_from_u64(3);

    let distorted = apply_random_distortion(&frame, 5, &mut rng);
    assert_eq!(distorted.data, frame.data);
}

#[test]
fn test_distortion_preserves_shape_and_changes_pixels() {
    let frame = textured_frame(64, 64);
    let mut rng = StdRng::seed_from_u64(11);

    let distorted = apply_random_distortion(&frame, 3, &mut rng);

    assert_eq!(distorted.data.dim(), frame.data.dim());

    let changed = distorted
        .data
        .iter()
        .zip(frame.data.iter())
        .filter(|(a, b)| (**a - **b).abs() > 1e-6)
        .count();
    assert!(changed > 0, "level 3 distortion left every pixel intact");
}

#[test]
fn test_distorted_values_stay_finite_and_in_range() {
    let frame = textured_frame(80, 60);
    let mut rng = StdRng::seed_from_u64(99);

    let distorted = apply_random_distortion(&frame, 7, &mut rng);

    for &v in distorted.data.iter() {
        assert!(v.is_finite());
        // Reflect-border bilinear sampling interpolates existing values,
        // so the output range cannot exceed the input range.
        assert!((0.0..=1.0).contains(&v), "out-of-range sample {v}");
    }
}

#[test]
fn test_independent_draws_differ() {
    let frame = textured_frame(64, 64);
    let mut rng = StdRng::seed_from_u64(5);

    let first = apply_random_distortion(&frame, 5, &mut rng);
    let second = apply_random_distortion(&frame, 5, &mut rng);

    assert_ne!(first.data, second.data);
}
