/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Maximum attempts to draw a non-uniform random crop before the
/// template synthesizer gives up with `DegenerateInput`.
pub const MAX_CROP_RETRIES: usize = 100;

/// Variance below this is treated as a uniform image during normalization.
pub const ZERO_VARIANCE_EPSILON: f64 = 1e-12;

/// Number of correlation peaks extracted per trial.
pub const DEFAULT_PEAK_COUNT: usize = 3;

/// Maximum centroid distance (in pixels) for a peak to count as the
/// correct location.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 25.0;

/// Number of random rectangular regions warped per distortion pass.
pub const DISTORTION_REGION_COUNT: usize = 30;

/// Minimum side length (in pixels) of a distortion region.
pub const MIN_DISTORTION_REGION_SPAN: usize = 10;

/// Default distortion levels swept by the benchmark harness.
pub const DEFAULT_DISTORTION_LEVELS: [u32; 3] = [3, 5, 7];

/// Default scale-factor sweep for the benchmark harness (inclusive).
pub const DEFAULT_SCALE_RANGE: (u32, u32) = (2, 10);

/// Default number of trials per (distortion level, scale factor) batch.
pub const DEFAULT_TRIALS_PER_BATCH: usize = 1000;
