use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::distort::apply_random_distortion;
use crate::error::{PatchlocError, Result};
use crate::frame::Frame;
use crate::io::image_io::{load_image, save_png};
use crate::matching::{match_template, MatchConfig};
use crate::template::synthesize;

use super::config::BenchConfig;
use super::{diagnostics, persist};

/// Result of one benchmark trial; consumed immediately into counters.
#[derive(Clone, Copy, Debug)]
pub struct TrialOutcome {
    pub distortion_level: u32,
    pub scale_factor: u32,
    /// 1-based rank of the correct location, or `None` if not found.
    pub matched_rank: Option<usize>,
}

/// Aggregate counters for one (distortion level, scale factor) batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleStats {
    /// Trials that completed without error.
    pub total_trials: usize,
    /// Trials whose correct location appeared among the returned peaks.
    pub matched: usize,
    pub matched_at_1: usize,
    pub matched_at_2: usize,
    pub matched_at_3: usize,
}

impl ScaleStats {
    fn record(&mut self, matched_rank: Option<usize>) {
        self.total_trials += 1;
        if let Some(rank) = matched_rank {
            self.matched += 1;
            match rank {
                1 => self.matched_at_1 += 1,
                2 => self.matched_at_2 += 1,
                3 => self.matched_at_3 += 1,
                _ => {}
            }
        }
    }
}

/// Per-level aggregate, keyed by scale factor.
pub type LevelStats = BTreeMap<u32, ScaleStats>;

/// Progress notifications emitted by [`run_benchmark`].
pub enum BenchEvent<'a> {
    LevelStarted {
        level: u32,
        index: usize,
        total: usize,
    },
    ScaleCompleted {
        level: u32,
        scale: u32,
        stats: &'a ScaleStats,
    },
    LevelPersisted {
        level: u32,
    },
}

/// Run the full benchmark sweep.
///
/// For each distortion level: a reference image is drawn at random from the
/// corpus and distorted twice independently (source variant and
/// template-source variant); for each scale factor, `trials_per_batch`
/// trials run on the Rayon pool and their outcomes are folded into
/// [`ScaleStats`] by this thread only. A failed trial is logged and
/// excluded; it never aborts its batch. Results are persisted per level and
/// the level's temporary images are removed afterwards, error or not.
///
/// Trial outcomes depend on unseeded random draws; runs are intentionally
/// non-deterministic.
pub fn run_benchmark(
    config: &BenchConfig,
    mut on_event: impl FnMut(BenchEvent),
) -> Result<Vec<(u32, LevelStats)>> {
    let corpus = list_corpus(&config.corpus_dir)?;
    info!(images = corpus.len(), "Corpus loaded");

    let mut all_levels = Vec::with_capacity(config.distortion_levels.len());

    for (index, &level) in config.distortion_levels.iter().enumerate() {
        on_event(BenchEvent::LevelStarted {
            level,
            index,
            total: config.distortion_levels.len(),
        });

        let level_stats = run_level(config, &corpus, level, &mut on_event)?;

        if let Err(e) = persist::write_level_results(&config.output_dir, level, &level_stats) {
            error!(level, error = %e, "Failed to persist level results; continuing");
        } else {
            on_event(BenchEvent::LevelPersisted { level });
        }

        all_levels.push((level, level_stats));
    }

    Ok(all_levels)
}

fn run_level(
    config: &BenchConfig,
    corpus: &[PathBuf],
    level: u32,
    on_event: &mut impl FnMut(BenchEvent),
) -> Result<LevelStats> {
    // Temp images live only for the duration of this level; the guard
    // removes the directory on every exit path.
    let temp = TempLevelDir::create(config.output_dir.join("temp"))?;

    let mut rng = rand::rng();
    let reference_path = &corpus[rng.random_range(0..corpus.len())];
    info!(level, reference = %reference_path.display(), "Distorting reference image");
    let reference = load_image(reference_path)?;

    let source = apply_random_distortion(&reference, level, &mut rng);
    let template_source = apply_random_distortion(&reference, level, &mut rng);

    let stem = reference_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("reference");
    save_png(&source, &temp.path.join(format!("1_{stem}.png")))?;
    save_png(&template_source, &temp.path.join(format!("2_{stem}.png")))?;

    let mut level_stats = LevelStats::new();
    for &scale in &config.scale_factors {
        let stats = run_batch(config, &source, &template_source, level, scale);
        debug!(
            level,
            scale,
            matched = stats.matched,
            total = stats.total_trials,
            "Batch complete"
        );
        let stats = level_stats.entry(scale).or_insert(stats);
        on_event(BenchEvent::ScaleCompleted {
            level,
            scale,
            stats,
        });
    }

    if config.save_diagnostics {
        if let Some(&scale) = config.scale_factors.first() {
            if let Err(e) = diagnostics::render_level_diagnostics(
                &config.output_dir,
                level,
                scale,
                &source,
                &template_source,
                &config.matching,
            ) {
                warn!(level, error = %e, "Diagnostics rendering failed");
            }
        }
    }

    Ok(level_stats)
}

/// Run one batch of independent trials concurrently and aggregate the
/// outcomes.
///
/// Workers return immutable `TrialOutcome` records; only this thread
/// touches the counters, so no synchronization is needed on them.
fn run_batch(
    config: &BenchConfig,
    source: &Frame,
    template_source: &Frame,
    level: u32,
    scale: u32,
) -> ScaleStats {
    let outcomes: Vec<Result<TrialOutcome>> = (0..config.trials_per_batch)
        .into_par_iter()
        .map(|_| run_trial(source, template_source, level, scale, &config.matching))
        .collect();

    let mut stats = ScaleStats::default();
    for outcome in outcomes {
        match outcome {
            Ok(trial) => stats.record(trial.matched_rank),
            Err(e) => warn!(level, scale, error = %e, "Trial failed; excluded from aggregates"),
        }
    }
    stats
}

/// One trial: synthesize a template from the template-source variant at
/// rotation 0, locate it in the source variant, report the matched rank.
fn run_trial(
    source: &Frame,
    template_source: &Frame,
    level: u32,
    scale: u32,
    matching: &MatchConfig,
) -> Result<TrialOutcome> {
    let mut rng = rand::rng();
    let template = synthesize(template_source, 0.0, scale, &mut rng)?;

    let result = match_template(source, &template, matching).map_err(|e| match e {
        e @ (PatchlocError::DegenerateInput(_) | PatchlocError::DimensionMismatch { .. }) => e,
        other => PatchlocError::Trial(format!("scale {scale}: {other}")),
    })?;

    Ok(TrialOutcome {
        distortion_level: level,
        scale_factor: scale,
        matched_rank: result.matched_rank,
    })
}

fn list_corpus(dir: &Path) -> Result<Vec<PathBuf>> {
    const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

    let mut images: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_image {
            images.push(path);
        }
    }
    images.sort();

    if images.is_empty() {
        return Err(PatchlocError::EmptyCorpus(dir.to_path_buf()));
    }
    Ok(images)
}

/// Level-scoped temporary directory, removed on drop.
struct TempLevelDir {
    path: PathBuf,
}

impl TempLevelDir {
    fn create(path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }
}

impl Drop for TempLevelDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to remove temp directory");
        }
    }
}
