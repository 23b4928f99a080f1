use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use patchloc_core::distort::apply_random_distortion;
use patchloc_core::io::image_io::{load_image, save_png};

#[derive(Args)]
pub struct DistortArgs {
    /// Input image
    pub file: PathBuf,

    /// Distortion level (0 = identity)
    #[arg(long, default_value = "5")]
    pub level: u32,

    /// Output file path
    #[arg(short, long, default_value = "distorted.png")]
    pub output: PathBuf,
}

pub fn run(args: &DistortArgs) -> Result<()> {
    let frame = load_image(&args.file)?;
    let mut rng = rand::rng();
    let distorted = apply_random_distortion(&frame, args.level, &mut rng);
    save_png(&distorted, &args.output)?;
    println!("Saved to {}", args.output.display());
    Ok(())
}
