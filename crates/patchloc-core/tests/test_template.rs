mod common;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use patchloc_core::error::PatchlocError;
use patchloc_core::template::rotate::rotate_about_center;
use patchloc_core::template::{synthesize, CropRect, Template};

use common::{textured_frame, uniform_frame};

#[test]
fn test_synthesize_crop_dimensions_and_centroid() {
    let reference = textured_frame(50, 80);
    let mut rng = StdRng::seed_from_u64(7);

    let template = synthesize(&reference, 0.0, 2, &mut rng).unwrap();

    assert_eq!(template.frame.height(), 25);
    assert_eq!(template.frame.width(), 40);

    // Centroid is the crop window center in the (unrotated) reference frame.
    let (cx, cy) = template.centroid;
    assert_eq!(cx, template.region.x as f64 + 20.0);
    assert_eq!(cy, template.region.y as f64 + 12.5);
    assert!(cx >= 20.0 && cx <= 60.0);
    assert!(cy >= 12.5 && cy <= 37.5);
}

#[test]
fn test_synthesize_at_rotation_zero_matches_reference_pixels() {
    let reference = textured_frame(40, 40);
    let mut rng = StdRng::seed_from_u64(42);

    let template = synthesize(&reference, 0.0, 4, &mut rng).unwrap();
    let r = template.region;

    for row in 0..r.height {
        for col in 0..r.width {
            assert_eq!(
                template.frame.data[[row, col]],
                reference.data[[r.y + row, r.x + col]]
            );
        }
    }
}

#[test]
fn test_synthesize_uniform_image_fails_with_degenerate_input() {
    let reference = uniform_frame(50, 50, 0.5);
    let mut rng = StdRng::seed_from_u64(1);

    let err = synthesize(&reference, 0.0, 2, &mut rng).unwrap_err();
    assert!(matches!(err, PatchlocError::DegenerateInput(_)));
}

#[test]
fn test_synthesize_rejects_excessive_scale() {
    let reference = textured_frame(50, 50);
    let mut rng = StdRng::seed_from_u64(1);

    let err = synthesize(&reference, 0.0, 100, &mut rng).unwrap_err();
    assert!(matches!(err, PatchlocError::InvalidCrop(_)));
}

#[test]
fn test_from_region_rejects_out_of_bounds() {
    let source = textured_frame(30, 30);
    let err = Template::from_region(
        &source,
        CropRect {
            x: 25,
            y: 25,
            width: 10,
            height: 10,
        },
    )
    .unwrap_err();
    assert!(matches!(err, PatchlocError::InvalidCrop(_)));
}

#[test]
fn test_rotation_quarter_turn_moves_off_center_pixel() {
    // 11x11 canvas, center at (5, 5). A bright pixel below the center
    // should end up left of the center after a 90-degree rotation.
    let mut data = Array2::<f32>::zeros((11, 11));
    data[[8, 5]] = 1.0;

    let rotated = rotate_about_center(&data, 90.0);

    assert!(
        (rotated[[5, 2]] - 1.0).abs() < 1e-4,
        "expected bright pixel at (5, 2), got {}",
        rotated[[5, 2]]
    );
    assert!(rotated[[8, 5]].abs() < 1e-4);
}

#[test]
fn test_rotation_preserves_canvas_size() {
    let frame = textured_frame(24, 36);
    let rotated = rotate_about_center(&frame.data, 33.0);
    assert_eq!(rotated.dim(), (24, 36));
}
