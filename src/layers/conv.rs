use crate::tensor::{GridI32, GridU8};

/// Kernel side length. The whole network uses 3x3 kernels.
pub const KERNEL_SIZE: usize = 3;

/// Zero-point-corrected valid cross-correlation of an activation grid with
/// one 3x3 kernel, producing a fresh accumulator grid.
///
/// Output dims are `input - KERNEL_SIZE + 1` in each direction (no padding,
/// stride 1). Each element is
/// `sum over taps of (activation - act_zp) * (weight - weight_zp)`,
/// accumulated in i32.
///
/// Overflow bound: a single tap product is at most `255 * 383` in magnitude
/// (u8 activation minus u8 zero-point times i8 weight minus u8 zero-point),
/// so 9 taps over 5 accumulated channels stay below 4.5e6, far inside i32.
pub fn convolve(input: &GridU8, kernel: &[i8], act_zp: u8, weight_zp: u8) -> GridI32 {
    let mut out = GridI32::new(input.h - KERNEL_SIZE + 1, input.w - KERNEL_SIZE + 1);
    convolve_acc(&mut out, input, kernel, act_zp, weight_zp);
    out
}

/// Adds one input channel's convolution contribution into an existing
/// accumulator grid.
///
/// The caller owns bias handling: seed the accumulator with the output
/// channel's bias via [`GridI32::splat`] before the first channel, so the
/// bias enters the sum exactly once no matter how many channels are
/// accumulated or in which order.
pub fn convolve_acc(acc: &mut GridI32, input: &GridU8, kernel: &[i8], act_zp: u8, weight_zp: u8) {
    debug_assert_eq!(kernel.len(), KERNEL_SIZE * KERNEL_SIZE);
    debug_assert_eq!(acc.h, input.h - KERNEL_SIZE + 1);
    debug_assert_eq!(acc.w, input.w - KERNEL_SIZE + 1);

    let act_zp = act_zp as i32;
    let weight_zp = weight_zp as i32;

    for i in 0..acc.h {
        for j in 0..acc.w {
            let mut sum: i32 = 0;
            for k in 0..KERNEL_SIZE {
                for l in 0..KERNEL_SIZE {
                    let a = input.get(i + k, j + l) as i32 - act_zp;
                    let w = kernel[k * KERNEL_SIZE + l] as i32 - weight_zp;
                    sum += a * w;
                }
            }
            acc.add(i, j, sum);
        }
    }
}
