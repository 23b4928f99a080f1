use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchlocError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Template {template_w}x{template_h} exceeds source {source_w}x{source_h}")]
    DimensionMismatch {
        source_w: usize,
        source_h: usize,
        template_w: usize,
        template_h: usize,
    },

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("No images found in corpus directory {0}")]
    EmptyCorpus(PathBuf),

    #[error("Trial failed: {0}")]
    Trial(String),

    #[error("Failed to persist results: {0}")]
    Persistence(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PatchlocError>;
