use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use patchloc_core::bench::{run_benchmark, BenchConfig, BenchEvent};
use patchloc_core::matching::MatchConfig;

use crate::summary::print_bench_summary;

#[derive(Args)]
pub struct BenchArgs {
    /// Corpus directory of source images (required unless --config is given)
    pub corpus: Option<PathBuf>,

    /// Benchmark config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Comma-separated distortion levels
    #[arg(long, default_value = "3,5,7")]
    pub levels: String,

    /// Scale factors, as a range "2-10" or comma-separated list
    #[arg(long, default_value = "2-10")]
    pub scales: String,

    /// Trials per (distortion level, scale factor) batch
    #[arg(long, default_value = "1000")]
    pub trials: usize,

    /// Number of peaks extracted per trial
    #[arg(long, default_value = "3")]
    pub peaks: usize,

    /// Maximum centroid distance for a correct match (pixels)
    #[arg(long, default_value = "25")]
    pub threshold: f64,

    /// Discard peaks whose template box would extend past the source
    #[arg(long)]
    pub exclude_border: bool,

    /// Render diagnostic images for one trial per level
    #[arg(long)]
    pub diagnostics: bool,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,
}

pub fn run(args: &BenchArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid benchmark config")?
    } else {
        build_config_from_args(args)?
    };

    print_bench_summary(&config);

    let total_batches = config.distortion_levels.len() * config.scale_factors.len();
    let pb = ProgressBar::new(total_batches as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len} batches")?
            .progress_chars("=> "),
    );

    let results = run_benchmark(&config, |event| match event {
        BenchEvent::LevelStarted { level, index, total } => {
            pb.set_message(format!("Level {level} ({}/{total})", index + 1));
        }
        BenchEvent::ScaleCompleted { .. } => {
            pb.inc(1);
        }
        BenchEvent::LevelPersisted { level } => {
            pb.println(format!("Level {level} results persisted"));
        }
    })?;
    pb.finish_with_message("Sweep complete");

    println!(
        "\n{:>6}  {:>6}  {:>12}  {:>8}  {:>8}  {:>8}",
        "Level", "Scale", "Matched", "@1", "@2", "@3"
    );
    println!("{}", "-".repeat(58));
    for (level, level_stats) in &results {
        for (scale, s) in level_stats {
            let pct = if s.total_trials > 0 {
                s.matched as f64 / s.total_trials as f64 * 100.0
            } else {
                0.0
            };
            println!(
                "{:>6}  {:>6}  {:>5}/{:<5} {:>4.0}%  {:>8}  {:>8}  {:>8}",
                level, scale, s.matched, s.total_trials, pct, s.matched_at_1, s.matched_at_2, s.matched_at_3
            );
        }
    }
    println!(
        "\nResults written to {} ({} trials per batch)",
        config.output_dir.display(),
        config.trials_per_batch
    );

    Ok(())
}

fn build_config_from_args(args: &BenchArgs) -> Result<BenchConfig> {
    let Some(ref corpus) = args.corpus else {
        bail!("a corpus directory is required when no --config file is given");
    };

    Ok(BenchConfig {
        corpus_dir: corpus.clone(),
        output_dir: args.output.clone(),
        distortion_levels: parse_list(&args.levels).context("Invalid --levels")?,
        scale_factors: parse_scales(&args.scales).context("Invalid --scales")?,
        trials_per_batch: args.trials,
        matching: MatchConfig {
            peak_count: args.peaks,
            distance_threshold: args.threshold,
            exclude_border_peaks: args.exclude_border,
            ..Default::default()
        },
        save_diagnostics: args.diagnostics,
    })
}

fn parse_list(spec: &str) -> Result<Vec<u32>> {
    spec.split(',')
        .map(|s| s.trim().parse::<u32>().map_err(Into::into))
        .collect()
}

/// Parse "2-10" as an inclusive range, otherwise as a comma-separated list.
fn parse_scales(spec: &str) -> Result<Vec<u32>> {
    if let Some((lo, hi)) = spec.split_once('-') {
        let lo: u32 = lo.trim().parse()?;
        let hi: u32 = hi.trim().parse()?;
        if lo > hi {
            bail!("range start {lo} exceeds end {hi}");
        }
        return Ok((lo..=hi).collect());
    }
    parse_list(spec)
}
