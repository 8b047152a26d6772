use log::trace;

use crate::error::{InferenceError, Result};
use crate::layers::{affine_dot, argmax, convolve_acc, max_pool_2x2, pool_quant_relu};
use crate::quant::{Requant, CONV1_REQUANT, CONV2_REQUANT, FC1_REQUANT};
use crate::tensor::{GridI32, GridU8};

use super::{CnnParams, CONV_CHANNELS, FC1_INPUTS, IMAGE_PIXELS, IMAGE_SIDE, NUM_CLASSES};

/// The fixed-topology inference pipeline.
///
/// A single forward pass:
/// `28x28 image -> pool1 -> conv1 (x5) -> pool2/quant/relu -> conv2 (5x5
/// accumulated) -> pool3/quant/relu -> flatten (20) -> fc1 (x10) -> quant ->
/// fc2 (x10) -> argmax`.
///
/// This type is the only place that knows the topology (channel counts,
/// kernel bank indexing, flatten order); the stages it calls are
/// topology-agnostic. Inference borrows `self` immutably, so one network can
/// run concurrently from any number of threads.
pub struct QuantCnn {
    params: CnnParams,
}

impl QuantCnn {
    pub fn new(params: CnnParams) -> Self {
        QuantCnn { params }
    }

    /// Classifies one image, given as 784 row-major quantized samples.
    /// Returns the winning class index in `0..10`.
    pub fn classify(&self, pixels: &[u8]) -> Result<usize> {
        Ok(argmax(&self.class_scores(pixels)?))
    }

    /// Runs the forward pass and returns the raw 10 class scores from the
    /// final fully-connected layer. Exposed for parity checks against the
    /// hardware path, which must match these scores' argmax.
    pub fn class_scores(&self, pixels: &[u8]) -> Result<[i32; NUM_CLASSES]> {
        if pixels.len() != IMAGE_PIXELS {
            return Err(InferenceError::ImageShape { got: pixels.len() });
        }
        let image = GridU8::from_slice(IMAGE_SIDE, IMAGE_SIDE, pixels)?;
        let p = &self.params;

        trace!("pool 1");
        let pool1 = max_pool_2x2(&image);

        trace!("conv 1");
        let mut conv1_acc: Vec<GridI32> = Vec::with_capacity(CONV_CHANNELS);
        for oc in 0..CONV_CHANNELS {
            let mut acc = GridI32::splat(12, 12, p.conv1.bias[oc]);
            convolve_acc(&mut acc, &pool1, p.conv1.kernel(oc, 0), p.input_zp, p.conv1.weight_zp);
            conv1_acc.push(acc);
        }

        trace!("pool 2");
        let pool2: Vec<GridU8> = conv1_acc
            .iter()
            .map(|acc| pool_quant_grid(acc, &CONV1_REQUANT, p.conv1.out_zp))
            .collect();

        trace!("conv 2");
        let mut conv2_acc: Vec<GridI32> = Vec::with_capacity(CONV_CHANNELS);
        for oc in 0..CONV_CHANNELS {
            // Bias enters once via the seed; the 5 input-channel
            // contributions then sum in on top of it.
            let mut acc = GridI32::splat(4, 4, p.conv2.bias[oc]);
            for (ic, channel) in pool2.iter().enumerate() {
                convolve_acc(&mut acc, channel, p.conv2.kernel(oc, ic), p.conv1.out_zp, p.conv2.weight_zp);
            }
            conv2_acc.push(acc);
        }

        trace!("pool 3");
        let pool3: Vec<GridU8> = conv2_acc
            .iter()
            .map(|acc| pool_quant_grid(acc, &CONV2_REQUANT, p.conv2.out_zp))
            .collect();

        trace!("flatten");
        let mut flat = Vec::with_capacity(FC1_INPUTS);
        for channel in &pool3 {
            flat.extend_from_slice(channel.as_slice());
        }

        trace!("fc 1");
        let mut fc1_q = [0u8; NUM_CLASSES];
        for (o, q) in fc1_q.iter_mut().enumerate() {
            let acc = affine_dot(&flat, p.fc1.row(o), p.fc1.weight_zp, p.conv2.out_zp, p.fc1.bias[o]);
            *q = FC1_REQUANT.quantize_relu(acc, p.fc1.out_zp);
        }

        trace!("fc 2");
        let mut scores = [0i32; NUM_CLASSES];
        for (o, score) in scores.iter_mut().enumerate() {
            *score = affine_dot(&fc1_q, p.fc2.row(o), p.fc2.weight_zp, p.fc1.out_zp, p.fc2.bias[o]);
        }

        Ok(scores)
    }
}

/// Requantizes a whole accumulator grid through the fused 2x2 pool stage,
/// halving each dimension.
fn pool_quant_grid(acc: &GridI32, requant: &Requant, out_zp: u8) -> GridU8 {
    debug_assert!(acc.h % 2 == 0 && acc.w % 2 == 0);
    let mut out = GridU8::new(acc.h / 2, acc.w / 2);
    for i in 0..out.h {
        for j in 0..out.w {
            let window = [
                acc.get(i * 2, j * 2),
                acc.get(i * 2, j * 2 + 1),
                acc.get(i * 2 + 1, j * 2),
                acc.get(i * 2 + 1, j * 2 + 1),
            ];
            out.set(i, j, pool_quant_relu(window, requant, out_zp));
        }
    }
    out
}
