pub mod correlation;
pub mod evaluate;
pub mod peaks;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DISTANCE_THRESHOLD, DEFAULT_PEAK_COUNT};
use crate::error::Result;
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::frame::Frame;
use crate::normalize::zero_mean_normalize;
use crate::template::Template;

pub use correlation::{correlate, CorrelationBackend};
pub use evaluate::evaluate;
pub use peaks::{extract_peaks, PeakCandidate};

/// Parameters for a single template-matching run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Correlation backend.
    #[serde(default)]
    pub backend: CorrelationBackend,
    /// Number of peaks to extract from the correlation surface.
    #[serde(default = "default_peak_count")]
    pub peak_count: usize,
    /// Minimum distance between extracted peaks; defaults to the template
    /// height when unset.
    #[serde(default)]
    pub min_distance: Option<usize>,
    /// Maximum centroid distance for a peak to count as correct.
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
    /// Discard peaks whose template-sized bounding box would extend past
    /// the source image.
    #[serde(default)]
    pub exclude_border_peaks: bool,
    /// Optional Gaussian blur applied to the template before matching,
    /// simulating a defocused observation.
    #[serde(default)]
    pub template_blur_sigma: Option<f32>,
}

fn default_peak_count() -> usize {
    DEFAULT_PEAK_COUNT
}

fn default_distance_threshold() -> f64 {
    DEFAULT_DISTANCE_THRESHOLD
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            backend: CorrelationBackend::Fft,
            peak_count: DEFAULT_PEAK_COUNT,
            min_distance: None,
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            exclude_border_peaks: false,
            template_blur_sigma: None,
        }
    }
}

/// Outcome of matching one template against one source image.
#[derive(Clone, Debug)]
pub struct MatchResult {
    /// Extracted peaks, descending confidence.
    pub peaks: Vec<PeakCandidate>,
    /// Ground-truth centroid the peaks were evaluated against.
    pub ground_truth: (f64, f64),
    /// Template dimensions (height, width) used for centroid derivation.
    pub template_dims: (usize, usize),
    /// 1-based rank of the first peak at the correct location, if any.
    pub matched_rank: Option<usize>,
}

/// Locate `template` inside `source` and score the result against the
/// template's ground-truth centroid.
///
/// Both images are normalized to zero mean and unit variance, correlated in
/// the configured backend, and the top peaks (separated by at least the
/// template height, unless overridden) are evaluated in confidence order.
pub fn match_template(
    source: &Frame,
    template: &Template,
    config: &MatchConfig,
) -> Result<MatchResult> {
    let (result, _surface) = match_template_with_surface(source, template, config)?;
    Ok(result)
}

/// Locate a template and also return the correlation surface, for
/// diagnostic rendering.
pub fn match_template_with_surface(
    source: &Frame,
    template: &Template,
    config: &MatchConfig,
) -> Result<(MatchResult, Array2<f64>)> {
    let (th, tw) = template.frame.data.dim();

    let tpl_data: Array2<f32> = match config.template_blur_sigma {
        Some(sigma) if sigma > 0.0 => gaussian_blur_array(&template.frame.data, sigma),
        _ => template.frame.data.clone(),
    };

    let source_norm = zero_mean_normalize(&source.data)?;
    let template_norm = zero_mean_normalize(&tpl_data)?;

    let surface = correlate(&source_norm, &template_norm, config.backend)?;

    let min_distance = config.min_distance.unwrap_or(th);
    let fit_within = config.exclude_border_peaks.then_some((th, tw));
    let peaks = extract_peaks(&surface, min_distance, config.peak_count, fit_within);

    let matched_rank = evaluate(
        &peaks,
        th,
        tw,
        template.centroid,
        config.distance_threshold,
    );

    Ok((
        MatchResult {
            peaks,
            ground_truth: template.centroid,
            template_dims: (th, tw),
            matched_rank,
        },
        surface,
    ))
}
