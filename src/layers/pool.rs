use crate::quant::Requant;
use crate::tensor::GridU8;

/// 2x2 non-overlapping max pool over an activation grid (stride 2).
///
/// Input dims must be even; output dims are halved.
pub fn max_pool_2x2(input: &GridU8) -> GridU8 {
    debug_assert!(input.h % 2 == 0 && input.w % 2 == 0);
    let mut out = GridU8::new(input.h / 2, input.w / 2);
    for i in 0..out.h {
        for j in 0..out.w {
            let m = input
                .get(i * 2, j * 2)
                .max(input.get(i * 2, j * 2 + 1))
                .max(input.get(i * 2 + 1, j * 2))
                .max(input.get(i * 2 + 1, j * 2 + 1));
            out.set(i, j, m);
        }
    }
    out
}

/// Fused 2x2 max pool over four pre-requantization accumulators, followed by
/// the layer rescale, output zero-point add, saturation to [0, 255], and the
/// quantized-space ReLU.
pub fn pool_quant_relu(window: [i32; 4], requant: &Requant, out_zp: u8) -> u8 {
    let max = window[0].max(window[1]).max(window[2]).max(window[3]);
    requant.quantize_relu(max, out_zp)
}
