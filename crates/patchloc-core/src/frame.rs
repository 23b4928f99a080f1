use ndarray::Array2;

/// A single grayscale image.
/// Pixel values are f32 in [0.0, 1.0] when loaded from disk; intermediate
/// stages (normalization, warping) may leave that range.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl Frame {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}
