pub mod config;
pub mod diagnostics;
pub mod persist;
pub mod runner;

pub use config::BenchConfig;
pub use runner::{run_benchmark, BenchEvent, LevelStats, ScaleStats, TrialOutcome};
