//! Integer-only quantized CNN inference for MNIST-style digit classification.
//!
//! This crate is the bit-accurate software reference for a hardware-accelerated
//! inference path. The network is fixed: two 3x3 convolutions and two
//! fully-connected layers over a 28x28 grayscale input, producing a 10-class
//! decision. All arithmetic is integer: 8-bit unsigned activations, 8-bit
//! signed weights, 32-bit accumulation, and a multiplier-free shift-based
//! requantization between layers.
//!
//! # Example
//!
//! ```no_run
//! use quantcnn::model::{CnnParams, QuantCnn};
//! use std::fs::File;
//!
//! let mut file = File::open("data/cnn_params.bin").unwrap();
//! let params = CnnParams::read_from(&mut file).unwrap();
//! let net = QuantCnn::new(params);
//! let pixels = vec![0u8; 784];
//! let class = net.classify(&pixels).unwrap();
//! assert!(class < 10);
//! ```

/// 2D activation and accumulator grids.
pub mod tensor;
/// Per-layer quantization constants and the shift-based requantizer.
pub mod quant;
/// Topology-agnostic compute stages: convolution, pooling, fully-connected, argmax.
pub mod layers;
/// Parameter tables and the fixed-topology inference pipeline.
pub mod model;
/// Accelerator offload boundary and the software oracle.
pub mod accel;
/// MNIST dataset loaders.
pub mod loader;
/// Error types.
pub mod error;

pub use error::{InferenceError, Result};
pub use model::{CnnParams, QuantCnn};
