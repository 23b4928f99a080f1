use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DISTORTION_LEVELS, DEFAULT_SCALE_RANGE, DEFAULT_TRIALS_PER_BATCH};
use crate::matching::MatchConfig;

/// Full configuration of a benchmark run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Directory of source images to draw references from (read-only).
    pub corpus_dir: PathBuf,
    /// Directory receiving result files, temp images and diagnostics.
    pub output_dir: PathBuf,
    /// Distortion levels to sweep, one persisted result set per level.
    #[serde(default = "default_distortion_levels")]
    pub distortion_levels: Vec<u32>,
    /// Scale factors swept within each distortion level.
    #[serde(default = "default_scale_factors")]
    pub scale_factors: Vec<u32>,
    /// Independent trials per (distortion level, scale factor) batch.
    #[serde(default = "default_trials_per_batch")]
    pub trials_per_batch: usize,
    /// Matching parameters shared by all trials.
    #[serde(default)]
    pub matching: MatchConfig,
    /// Render diagnostic images for one representative trial per level.
    #[serde(default)]
    pub save_diagnostics: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("corpus"),
            output_dir: PathBuf::from("output"),
            distortion_levels: default_distortion_levels(),
            scale_factors: default_scale_factors(),
            trials_per_batch: default_trials_per_batch(),
            matching: MatchConfig::default(),
            save_diagnostics: false,
        }
    }
}

fn default_distortion_levels() -> Vec<u32> {
    DEFAULT_DISTORTION_LEVELS.to_vec()
}

fn default_scale_factors() -> Vec<u32> {
    (DEFAULT_SCALE_RANGE.0..=DEFAULT_SCALE_RANGE.1).collect()
}

fn default_trials_per_batch() -> usize {
    DEFAULT_TRIALS_PER_BATCH
}
