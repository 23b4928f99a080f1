pub mod rotate;

use ndarray::{s, ArrayView2};
use rand::Rng;

use crate::consts::MAX_CROP_RETRIES;
use crate::error::{PatchlocError, Result};
use crate::frame::Frame;

use rotate::rotate_about_center;

/// A rectangle in image coordinates for cropping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRect {
    /// Centroid (x, y) of the rectangle.
    pub fn centroid(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// A template patch cut from a (possibly rotated) reference image, paired
/// with the ground-truth centroid of the cut in that image's coordinates.
/// Immutable once synthesized; consumed by a single trial.
#[derive(Clone, Debug)]
pub struct Template {
    pub frame: Frame,
    /// Ground-truth centroid (x, y) in the coordinate frame the template
    /// was cropped from.
    pub centroid: (f64, f64),
    /// The crop window that produced this template.
    pub region: CropRect,
}

impl Template {
    /// Cut a template verbatim from `source` at a known position.
    pub fn from_region(source: &Frame, region: CropRect) -> Result<Self> {
        let (h, w) = source.data.dim();
        if region.width == 0 || region.height == 0 {
            return Err(PatchlocError::InvalidCrop(
                "crop width and height must be > 0".into(),
            ));
        }
        if region.x + region.width > w || region.y + region.height > h {
            return Err(PatchlocError::InvalidCrop(format!(
                "crop ({},{} {}x{}) exceeds source dimensions {}x{}",
                region.x, region.y, region.width, region.height, w, h
            )));
        }

        let data = source
            .data
            .slice(s![
                region.y..region.y + region.height,
                region.x..region.x + region.width
            ])
            .to_owned();

        Ok(Self {
            frame: Frame::new(data),
            centroid: region.centroid(),
            region,
        })
    }
}

/// Synthesize a template from a reference image: rotate about the center,
/// then cut a random `(h/scale, w/scale)` window that is not a single
/// uniform color.
///
/// The returned centroid is expressed in the rotated image's coordinate
/// frame and serves as evaluation ground truth. Rejection sampling is
/// bounded at [`MAX_CROP_RETRIES`]; an input whose every crop is uniform
/// (e.g. a blank image) fails with `DegenerateInput` instead of looping
/// forever.
pub fn synthesize<R: Rng>(
    reference: &Frame,
    rotation_deg: f32,
    scale_factor: u32,
    rng: &mut R,
) -> Result<Template> {
    if scale_factor == 0 {
        return Err(PatchlocError::InvalidCrop("scale factor must be > 0".into()));
    }

    let (h, w) = reference.data.dim();
    let crop_h = h / scale_factor as usize;
    let crop_w = w / scale_factor as usize;
    if crop_h == 0 || crop_w == 0 {
        return Err(PatchlocError::InvalidCrop(format!(
            "scale factor {} leaves no pixels of a {}x{} image",
            scale_factor, w, h
        )));
    }

    let rotated = if rotation_deg == 0.0 {
        reference.data.clone()
    } else {
        rotate_about_center(&reference.data, rotation_deg)
    };

    for _ in 0..MAX_CROP_RETRIES {
        let top = rng.random_range(0..=h - crop_h);
        let left = rng.random_range(0..=w - crop_w);
        let crop = rotated.slice(s![top..top + crop_h, left..left + crop_w]);

        if is_uniform(&crop) {
            continue;
        }

        let region = CropRect {
            x: left,
            y: top,
            width: crop_w,
            height: crop_h,
        };
        return Ok(Template {
            frame: Frame::new(crop.to_owned()),
            centroid: region.centroid(),
            region,
        });
    }

    Err(PatchlocError::DegenerateInput(format!(
        "no non-uniform {}x{} crop found after {} attempts",
        crop_w, crop_h, MAX_CROP_RETRIES
    )))
}

/// True when every pixel equals the first one.
fn is_uniform(data: &ArrayView2<f32>) -> bool {
    let first = data[[0, 0]];
    data.iter().all(|&v| v == first)
}
