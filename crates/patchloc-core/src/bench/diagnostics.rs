use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::error::Result;
use crate::frame::Frame;
use crate::io::image_io::save_rgb_png;
use crate::matching::correlation::fft2d;
use crate::matching::{match_template_with_surface, MatchConfig, MatchResult};
use crate::template::synthesize;

const MARKER: Rgb<u8> = Rgb([255, 0, 0]);
const GROUND_TRUTH: Rgb<u8> = Rgb([0, 0, 0]);

/// Render the diagnostic set for one representative trial of a distortion
/// level: correlation heatmap, annotated detections, and the template's
/// log-magnitude spectrum, under `<output>/diagnostics/<level>/`.
pub fn render_level_diagnostics(
    output_dir: &Path,
    level: u32,
    scale: u32,
    source: &Frame,
    template_source: &Frame,
    matching: &MatchConfig,
) -> Result<()> {
    let dir = output_dir.join("diagnostics").join(level.to_string());
    fs::create_dir_all(&dir)?;

    let mut rng = rand::rng();
    let template = synthesize(template_source, 0.0, scale, &mut rng)?;
    let (result, surface) = match_template_with_surface(source, &template, matching)?;

    render_heatmap(&surface, &result, &dir.join("correlation_peaks.png"))?;
    render_detections(source, &result, &dir.join("detected.png"))?;
    render_spectrum(&template.frame, &dir.join("fourier_template.png"))?;
    Ok(())
}

/// Correlation surface as a jet-colormapped heatmap with peak markers.
pub fn render_heatmap(surface: &Array2<f64>, result: &MatchResult, path: &Path) -> Result<()> {
    let mut img = colormap_image(surface);
    for peak in &result.peaks {
        draw_crosshair(&mut img, peak.col as i64, peak.row as i64, 5, MARKER);
    }
    save_rgb_png(&img, path)
}

/// Source image with a template-sized box at each peak and a crosshair at
/// the ground-truth centroid.
pub fn render_detections(source: &Frame, result: &MatchResult, path: &Path) -> Result<()> {
    let h = source.height();
    let w = source.width();
    let (th, tw) = result.template_dims;

    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let v = (source.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Rgb([v, v, v]));
        }
    }

    for peak in &result.peaks {
        draw_rect(
            &mut img,
            peak.col as i64,
            peak.row as i64,
            tw as i64,
            th as i64,
            MARKER,
        );
    }
    draw_crosshair(
        &mut img,
        result.ground_truth.0.round() as i64,
        result.ground_truth.1.round() as i64,
        10,
        GROUND_TRUTH,
    );

    save_rgb_png(&img, path)
}

/// Template's fftshifted log-magnitude spectrum as a jet heatmap.
pub fn render_spectrum(template: &Frame, path: &Path) -> Result<()> {
    let spectrum = fft2d(&template.data);
    let (h, w) = spectrum.dim();

    let mut magnitude = Array2::<f64>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            // Shift the zero-frequency component to the center.
            let sr = (row + h / 2) % h;
            let sc = (col + w / 2) % w;
            magnitude[[sr, sc]] = 20.0 * (spectrum[[row, col]].norm() + 1e-12).ln();
        }
    }

    save_rgb_png(&colormap_image(&magnitude), path)
}

/// Min-max normalize a surface and map it through a jet-style colormap.
fn colormap_image(surface: &Array2<f64>) -> RgbImage {
    let (h, w) = surface.dim();
    let min = surface.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = surface.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if max > min { max - min } else { 1.0 };

    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let t = (surface[[row, col]] - min) / range;
            img.put_pixel(col as u32, row as u32, jet(t));
        }
    }
    img
}

fn jet(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let r = (1.5 - (4.0 * t - 3.0).abs()).clamp(0.0, 1.0);
    let g = (1.5 - (4.0 * t - 2.0).abs()).clamp(0.0, 1.0);
    let b = (1.5 - (4.0 * t - 1.0).abs()).clamp(0.0, 1.0);
    Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8])
}

fn draw_rect(img: &mut RgbImage, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
    for dx in 0..w {
        put_pixel_checked(img, x + dx, y, color);
        put_pixel_checked(img, x + dx, y + h - 1, color);
    }
    for dy in 0..h {
        put_pixel_checked(img, x, y + dy, color);
        put_pixel_checked(img, x + w - 1, y + dy, color);
    }
}

fn draw_crosshair(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    for d in -radius..=radius {
        put_pixel_checked(img, cx + d, cy, color);
        put_pixel_checked(img, cx, cy + d, color);
    }
}

fn put_pixel_checked(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}
