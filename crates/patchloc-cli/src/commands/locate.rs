use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use patchloc_core::bench::diagnostics;
use patchloc_core::io::image_io::load_image;
use patchloc_core::matching::{match_template_with_surface, CorrelationBackend, MatchConfig};
use patchloc_core::template::synthesize;

#[derive(Clone, ValueEnum)]
pub enum BackendArg {
    Fft,
    Direct,
}

#[derive(Args)]
pub struct LocateArgs {
    /// Source image to search in
    pub source: PathBuf,

    /// Image the template patch is synthesized from
    pub template_source: PathBuf,

    /// Rotation applied to the template source before cropping (degrees)
    #[arg(long, default_value = "0")]
    pub rotation: f32,

    /// Scale factor: the crop is (height/scale, width/scale)
    #[arg(long, default_value = "5")]
    pub scale: u32,

    /// Number of peaks to report
    #[arg(long, default_value = "3")]
    pub peaks: usize,

    /// Maximum centroid distance for a correct match (pixels)
    #[arg(long, default_value = "25")]
    pub threshold: f64,

    /// Minimum distance between peaks (defaults to template height)
    #[arg(long)]
    pub min_distance: Option<usize>,

    /// Discard peaks whose template box would extend past the source
    #[arg(long)]
    pub exclude_border: bool,

    /// Gaussian blur sigma applied to the template before matching
    #[arg(long)]
    pub blur: Option<f32>,

    /// Correlation backend
    #[arg(long, value_enum, default_value = "fft")]
    pub backend: BackendArg,

    /// Directory to write diagnostic images into
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,
}

pub fn run(args: &LocateArgs) -> Result<()> {
    let source = load_image(&args.source)?;
    let template_source = load_image(&args.template_source)?;

    let mut rng = rand::rng();
    let template = synthesize(&template_source, args.rotation, args.scale, &mut rng)?;
    println!(
        "Template: {}x{} cut at ({:.1}, {:.1})",
        template.frame.width(),
        template.frame.height(),
        template.centroid.0,
        template.centroid.1
    );

    let config = MatchConfig {
        backend: match args.backend {
            BackendArg::Fft => CorrelationBackend::Fft,
            BackendArg::Direct => CorrelationBackend::Direct,
        },
        peak_count: args.peaks,
        min_distance: args.min_distance,
        distance_threshold: args.threshold,
        exclude_border_peaks: args.exclude_border,
        template_blur_sigma: args.blur,
    };

    let (result, surface) = match_template_with_surface(&source, &template, &config)?;

    println!("\n{:>5}  {:>12}  {:>10}  {:>10}", "Rank", "Location", "Conf", "Dist");
    println!("{}", "-".repeat(44));
    let (th, tw) = result.template_dims;
    for (i, peak) in result.peaks.iter().enumerate() {
        let cx = peak.col as f64 + tw as f64 / 2.0;
        let cy = peak.row as f64 + th as f64 / 2.0;
        let dist =
            ((cx - result.ground_truth.0).powi(2) + (cy - result.ground_truth.1).powi(2)).sqrt();
        println!(
            "{:>5}  ({:>4},{:>5})  {:>10.4}  {:>10.2}",
            i + 1,
            peak.row,
            peak.col,
            peak.confidence,
            dist
        );
    }

    match result.matched_rank {
        Some(rank) => println!("\nFound correct location at rank {rank}."),
        None => println!("\nCould not find correct location."),
    }

    if let Some(ref dir) = args.diagnostics {
        std::fs::create_dir_all(dir)?;
        diagnostics::render_heatmap(&surface, &result, &dir.join("correlation_peaks.png"))?;
        diagnostics::render_detections(&source, &result, &dir.join("detected.png"))?;
        diagnostics::render_spectrum(&template.frame, &dir.join("fourier_template.png"))?;
        println!("Diagnostics saved to {}", dir.display());
    }

    Ok(())
}
