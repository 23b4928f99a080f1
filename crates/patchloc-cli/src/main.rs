mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patchloc", about = "Fourier template-matching localization benchmark")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate a synthesized template patch inside a source image
    Locate(commands::locate::LocateArgs),
    /// Apply randomized local distortions to an image
    Distort(commands::distort::DistortArgs),
    /// Run the multi-level distortion benchmark
    Bench(commands::bench::BenchArgs),
    /// Print or save the default benchmark config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Locate(args) => commands::locate::run(args),
        Commands::Distort(args) => commands::distort::run(args),
        Commands::Bench(args) => commands::bench::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
