/// Zero-point-corrected dot product of a flattened activation vector with one
/// weight row, plus bias, in i32 accumulation.
///
/// `sum over i of (weight[i] - weight_zp) * (activation[i] - act_zp) + bias`.
/// Vector lengths are fixed per layer; a mismatch is a caller bug.
pub fn affine_dot(activations: &[u8], weights: &[i8], weight_zp: u8, act_zp: u8, bias: i32) -> i32 {
    debug_assert_eq!(activations.len(), weights.len());

    let act_zp = act_zp as i32;
    let weight_zp = weight_zp as i32;

    let mut sum: i32 = 0;
    for (&a, &w) in activations.iter().zip(weights.iter()) {
        sum += (w as i32 - weight_zp) * (a as i32 - act_zp);
    }
    sum + bias
}
