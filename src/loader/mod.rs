/// MNIST IDX-format image and label loaders.
mod mnist;

pub use mnist::{quantize_pixel, MnistImages, MnistLabels};
