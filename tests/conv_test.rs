use quantcnn::layers::{affine_dot, convolve, convolve_acc, max_pool_2x2, pool_quant_relu};
use quantcnn::quant::CONV1_REQUANT;
use quantcnn::tensor::{GridI32, GridU8};

fn fill_deterministic(grid: &mut GridU8, seed: usize) {
    for i in 0..grid.data.len() {
        grid.data[i] = ((i * 31 + seed * 17 + 7) % 251) as u8;
    }
}

#[test]
fn conv_output_dims_14_to_12() {
    let input = GridU8::new(14, 14);
    let kernel = [0i8; 9];
    let out = convolve(&input, &kernel, 0, 0);
    assert_eq!((out.h, out.w), (12, 12), "14x14 input must give 12x12 output");
}

#[test]
fn conv_output_dims_6_to_4() {
    let input = GridU8::new(6, 6);
    let kernel = [0i8; 9];
    let out = convolve(&input, &kernel, 0, 0);
    assert_eq!((out.h, out.w), (4, 4), "6x6 input must give 4x4 output");
}

#[test]
fn conv_center_tap_passes_corrected_activation() {
    let mut input = GridU8::new(6, 6);
    input.fill(100);
    // Center tap only: each output is one activation minus the zero-point.
    let mut kernel = [0i8; 9];
    kernel[4] = 1;
    let out = convolve(&input, &kernel, 10, 0);
    for i in 0..out.h {
        for j in 0..out.w {
            assert_eq!(out.get(i, j), 90);
        }
    }
}

#[test]
fn conv_all_ones_kernel_sums_window() {
    let mut input = GridU8::new(6, 6);
    input.fill(100);
    let kernel = [1i8; 9];
    let out = convolve(&input, &kernel, 10, 0);
    for i in 0..out.h {
        for j in 0..out.w {
            assert_eq!(out.get(i, j), 9 * 90);
        }
    }
}

#[test]
fn conv_weight_zero_point_cancels_uniform_kernel() {
    // Every corrected weight is (5 - 5) = 0, so the output must be all zero
    // regardless of the activations.
    let mut input = GridU8::new(6, 6);
    fill_deterministic(&mut input, 3);
    let kernel = [5i8; 9];
    let out = convolve(&input, &kernel, 17, 5);
    for i in 0..out.h {
        for j in 0..out.w {
            assert_eq!(out.get(i, j), 0);
        }
    }
}

#[test]
fn conv_hand_computed_single_window() {
    // 3x3 input, 3x3 kernel: one output element.
    let input = GridU8::from_slice(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
    let kernel: [i8; 9] = [1, 0, -1, 2, 0, -2, 1, 0, -1];
    let out = convolve(&input, &kernel, 0, 0);
    // 1*1 + 3*(-1) + 4*2 + 6*(-2) + 7*1 + 9*(-1) = 1 - 3 + 8 - 12 + 7 - 9 = -8
    assert_eq!(out.get(0, 0), -8);
}

#[test]
fn multi_channel_accumulation_adds_bias_exactly_once() {
    let channels: Vec<GridU8> = (0..5)
        .map(|c| {
            let mut g = GridU8::new(6, 6);
            fill_deterministic(&mut g, c);
            g
        })
        .collect();
    let kernels: Vec<[i8; 9]> = (0..5)
        .map(|c| {
            let mut k = [0i8; 9];
            for (i, v) in k.iter_mut().enumerate() {
                *v = ((i as i32 * 7 + c as i32 * 13) % 100 - 50) as i8;
            }
            k
        })
        .collect();
    let bias = 1234;

    // Forward order.
    let mut forward = GridI32::splat(4, 4, bias);
    for c in 0..5 {
        convolve_acc(&mut forward, &channels[c], &kernels[c], 9, 3);
    }

    // Reverse order.
    let mut reverse = GridI32::splat(4, 4, bias);
    for c in (0..5).rev() {
        convolve_acc(&mut reverse, &channels[c], &kernels[c], 9, 3);
    }

    assert_eq!(forward, reverse, "accumulation must be order-independent");

    // Against the explicit sum of per-channel convolutions plus one bias.
    for i in 0..4 {
        for j in 0..4 {
            let expected: i32 = bias
                + (0..5)
                    .map(|c| convolve(&channels[c], &kernels[c], 9, 3).get(i, j))
                    .sum::<i32>();
            assert_eq!(forward.get(i, j), expected, "bias must enter the sum exactly once");
        }
    }
}

#[test]
fn max_pool_halves_dims_and_takes_window_max() {
    let input = GridU8::from_slice(
        4,
        4,
        &[
            1, 9, 2, 2, //
            3, 4, 8, 1, //
            0, 0, 7, 7, //
            5, 1, 6, 9, //
        ],
    )
    .unwrap();
    let out = max_pool_2x2(&input);
    assert_eq!((out.h, out.w), (2, 2));
    assert_eq!(out.get(0, 0), 9);
    assert_eq!(out.get(0, 1), 8);
    assert_eq!(out.get(1, 0), 5);
    assert_eq!(out.get(1, 1), 9);
}

#[test]
fn pool_quant_relu_selects_accumulator_max() {
    // max is 512; conv1 rescale gives 512 * 35 >> 9 = 35, plus zero-point 10.
    let out = pool_quant_relu([512, 0, -5, 100], &CONV1_REQUANT, 10);
    assert_eq!(out, 45);
}

#[test]
fn affine_dot_hand_computed() {
    let acts: [u8; 3] = [1, 2, 3];
    let weights: [i8; 3] = [4, 5, 6];
    // (4-1)*(1-1) + (5-1)*(2-1) + (6-1)*(3-1) = 0 + 4 + 10 = 14, plus bias 10.
    assert_eq!(affine_dot(&acts, &weights, 1, 1, 10), 24);
}

#[test]
fn affine_dot_negative_weights() {
    let acts: [u8; 2] = [200, 0];
    let weights: [i8; 2] = [-100, -100];
    // (-100-0)*(200-50) + (-100-0)*(0-50) = -15000 + 5000 = -10000
    assert_eq!(affine_dot(&acts, &weights, 0, 50, 0), -10000);
}
