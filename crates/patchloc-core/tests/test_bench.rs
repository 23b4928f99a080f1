mod common;

use std::fs;

use patchloc_core::bench::{run_benchmark, BenchConfig, BenchEvent, LevelStats};
use patchloc_core::error::PatchlocError;
use patchloc_core::io::image_io::save_png;
use patchloc_core::matching::MatchConfig;

use common::{textured_frame, uniform_frame};

fn bench_config(root: &std::path::Path) -> BenchConfig {
    let corpus_dir = root.join("corpus");
    fs::create_dir_all(&corpus_dir).unwrap();
    save_png(&textured_frame(80, 80), &corpus_dir.join("a.png")).unwrap();
    save_png(&textured_frame(90, 70), &corpus_dir.join("b.png")).unwrap();

    BenchConfig {
        corpus_dir,
        output_dir: root.join("output"),
        distortion_levels: vec![1],
        scale_factors: vec![2],
        trials_per_batch: 10,
        matching: MatchConfig::default(),
        save_diagnostics: false,
    }
}

#[test]
fn test_benchmark_sweep_aggregates_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config = bench_config(dir.path());

    let mut levels_started = 0;
    let mut scales_completed = 0;
    let results = run_benchmark(&config, |event| match event {
        BenchEvent::LevelStarted { level, total, .. } => {
            assert_eq!(level, 1);
            assert_eq!(total, 1);
            levels_started += 1;
        }
        BenchEvent::ScaleCompleted { level, scale, .. } => {
            assert_eq!((level, scale), (1, 2));
            scales_completed += 1;
        }
        BenchEvent::LevelPersisted { .. } => {}
    })
    .unwrap();

    assert_eq!(levels_started, 1);
    assert_eq!(scales_completed, 1);

    assert_eq!(results.len(), 1);
    let (level, stats) = &results[0];
    assert_eq!(*level, 1);

    let scale_stats = stats.get(&2).unwrap();
    assert!(scale_stats.total_trials <= config.trials_per_batch);
    assert!(scale_stats.matched <= scale_stats.total_trials);
    assert!(
        scale_stats.matched_at_1 + scale_stats.matched_at_2 + scale_stats.matched_at_3
            <= scale_stats.matched
    );

    // Persisted JSON round-trips to the in-memory aggregates.
    let json_path = config.output_dir.join("jsons").join("1_results.json");
    let persisted: LevelStats =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(&persisted, stats);

    let txt = fs::read_to_string(config.output_dir.join("txts").join("1_results.txt")).unwrap();
    assert!(txt.contains("scale factor 2"));

    // Temp images are cleaned up after the level finishes.
    assert!(!config.output_dir.join("temp").exists());
}

#[test]
fn test_failed_trials_are_excluded_and_sweep_completes() {
    // A uniform corpus image makes every trial fail template synthesis;
    // the batch must survive with zero completed trials, and the level's
    // (empty) results must still be persisted.
    let dir = tempfile::tempdir().unwrap();
    let corpus_dir = dir.path().join("corpus");
    fs::create_dir_all(&corpus_dir).unwrap();
    save_png(&uniform_frame(80, 80, 0.5), &corpus_dir.join("flat.png")).unwrap();

    let config = BenchConfig {
        corpus_dir,
        output_dir: dir.path().join("output"),
        distortion_levels: vec![0],
        scale_factors: vec![2],
        trials_per_batch: 10,
        matching: MatchConfig::default(),
        save_diagnostics: false,
    };

    let results = run_benchmark(&config, |_| {}).unwrap();

    assert_eq!(results.len(), 1);
    let scale_stats = results[0].1.get(&2).unwrap();
    assert_eq!(scale_stats.total_trials, 0);
    assert_eq!(scale_stats.matched, 0);

    let json_path = config.output_dir.join("jsons").join("0_results.json");
    let persisted: LevelStats =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(&persisted, &results[0].1);
}

#[test]
fn test_persistence_failure_does_not_abort_the_sweep() {
    // Occupy the jsons path with a plain file so writing results fails for
    // every level; the sweep must still run all levels and return their
    // stats, with no persisted-level notifications.
    let dir = tempfile::tempdir().unwrap();
    let mut config = bench_config(dir.path());
    config.distortion_levels = vec![1, 2];
    config.trials_per_batch = 2;

    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.output_dir.join("jsons"), "occupied").unwrap();

    let mut levels_persisted = 0;
    let results = run_benchmark(&config, |event| {
        if let BenchEvent::LevelPersisted { .. } = event {
            levels_persisted += 1;
        }
    })
    .unwrap();

    assert_eq!(levels_persisted, 0);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, 1);
    assert_eq!(results[1].0, 2);
    for (_, level_stats) in &results {
        assert!(level_stats.contains_key(&2));
    }
}

#[test]
fn test_empty_corpus_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_dir = dir.path().join("corpus");
    fs::create_dir_all(&corpus_dir).unwrap();

    let config = BenchConfig {
        corpus_dir,
        output_dir: dir.path().join("output"),
        ..BenchConfig::default()
    };

    let err = run_benchmark(&config, |_| {}).unwrap_err();
    assert!(matches!(err, PatchlocError::EmptyCorpus(_)));
}

#[test]
fn test_non_image_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_dir = dir.path().join("corpus");
    fs::create_dir_all(&corpus_dir).unwrap();
    fs::write(corpus_dir.join("notes.txt"), "not an image").unwrap();

    let config = BenchConfig {
        corpus_dir,
        output_dir: dir.path().join("output"),
        ..BenchConfig::default()
    };

    let err = run_benchmark(&config, |_| {}).unwrap_err();
    assert!(matches!(err, PatchlocError::EmptyCorpus(_)));
}
