/// Affine valid convolution.
pub mod conv;
/// Max pooling and the fused pool + requantize + activate stage.
pub mod pool;
/// Affine fully-connected dot product.
pub mod fc;
/// Class selection.
pub mod argmax;

pub use argmax::argmax;
pub use conv::{convolve, convolve_acc, KERNEL_SIZE};
pub use fc::affine_dot;
pub use pool::{max_pool_2x2, pool_quant_relu};
