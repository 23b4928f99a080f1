use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PatchlocError, Result};

use super::runner::LevelStats;

/// Persist one distortion level's aggregate statistics.
///
/// Two parallel outputs: `jsons/<level>_results.json` (machine-readable,
/// scale factor -> counters) and `txts/<level>_results.txt` (human-readable
/// percentages). Existing files for the same level are overwritten.
pub fn write_level_results(output_dir: &Path, level: u32, stats: &LevelStats) -> Result<()> {
    let json_dir = output_dir.join("jsons");
    let txt_dir = output_dir.join("txts");
    fs::create_dir_all(&json_dir).map_err(|e| persistence_err(&json_dir, &e))?;
    fs::create_dir_all(&txt_dir).map_err(|e| persistence_err(&txt_dir, &e))?;

    let json_path = json_dir.join(format!("{level}_results.json"));
    let json = serde_json::to_string_pretty(stats)
        .map_err(|e| PatchlocError::Persistence(format!("serializing level {level}: {e}")))?;
    fs::write(&json_path, json).map_err(|e| persistence_err(&json_path, &e))?;

    let txt_path = txt_dir.join(format!("{level}_results.txt"));
    fs::write(&txt_path, render_summary(stats)).map_err(|e| persistence_err(&txt_path, &e))?;

    info!(level, json = %json_path.display(), txt = %txt_path.display(), "Level results written");
    Ok(())
}

fn render_summary(stats: &LevelStats) -> String {
    let mut out = String::new();
    for (scale, s) in stats {
        out.push_str(&format!("Results for scale factor {scale}:\n"));
        out.push_str(&format!(
            "Found correct location: {}/{} or {:.2}%\n",
            s.matched,
            s.total_trials,
            percentage(s.matched, s.total_trials)
        ));
        if s.matched > 0 {
            out.push_str(&format!(
                "Found correct location at rank 1: {}/{} or {:.2}%\n",
                s.matched_at_1,
                s.matched,
                percentage(s.matched_at_1, s.matched)
            ));
            out.push_str(&format!(
                "Found correct location at rank 2: {}/{} or {:.2}%\n",
                s.matched_at_2,
                s.matched,
                percentage(s.matched_at_2, s.matched)
            ));
            out.push_str(&format!(
                "Found correct location at rank 3: {}/{} or {:.2}%\n",
                s.matched_at_3,
                s.matched,
                percentage(s.matched_at_3, s.matched)
            ));
        }
        out.push('\n');
    }
    out
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn persistence_err(path: &Path, e: &std::io::Error) -> PatchlocError {
    PatchlocError::Persistence(format!("{}: {e}", path.display()))
}
