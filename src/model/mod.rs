/// Fixed-shape parameter tables.
mod params;
/// The forward-pass orchestrator.
mod pipeline;

pub use params::{CnnParams, ConvParams, FcParams};
pub use pipeline::QuantCnn;

/// Input image side length.
pub const IMAGE_SIDE: usize = 28;
/// Flat input image length, row-major.
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;
/// Output channels of both convolution layers.
pub const CONV_CHANNELS: usize = 5;
/// Flattened feature count feeding the first fully-connected layer (5x2x2).
pub const FC1_INPUTS: usize = 20;
/// Number of output classes.
pub const NUM_CLASSES: usize = 10;
