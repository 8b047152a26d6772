use quantcnn::quant::{Requant, ShiftTerm, CONV1_REQUANT, CONV2_REQUANT, FC1_REQUANT};

#[test]
fn conv1_shift_sequence_is_times_35_over_512() {
    assert_eq!(CONV1_REQUANT.rescale(512), 35);
    assert_eq!(CONV1_REQUANT.rescale(1024), 70);
    assert_eq!(CONV1_REQUANT.rescale(0), 0);
    // 100 * 35 = 3500; 3500 >> 9 = 6 (truncation toward negative infinity).
    assert_eq!(CONV1_REQUANT.rescale(100), 6);
}

#[test]
fn conv2_shift_sequence_is_times_143_over_1024() {
    assert_eq!(CONV2_REQUANT.rescale(1024), 143);
    assert_eq!(CONV2_REQUANT.rescale(2048), 286);
    // 500 * 143 = 71500; 71500 >> 10 = 69.
    assert_eq!(CONV2_REQUANT.rescale(500), 69);
}

#[test]
fn fc1_shift_sequence_is_times_75_over_256() {
    assert_eq!(FC1_REQUANT.rescale(256), 75);
    // 100 * 75 = 7500; 7500 >> 8 = 29.
    assert_eq!(FC1_REQUANT.rescale(100), 29);
}

#[test]
fn rescale_of_negative_accumulator_floors() {
    // -512 * 35 = -17920; arithmetic >> 9 gives exactly -35.
    assert_eq!(CONV1_REQUANT.rescale(-512), -35);
    // -100 * 35 = -3500; arithmetic >> 9 floors -6.84 to -7, not -6.
    assert_eq!(CONV1_REQUANT.rescale(-100), -7);
}

#[test]
fn signed_terms_subtract() {
    // (acc << 3) - acc = acc * 7, then >> 2.
    static TERMS: [ShiftTerm; 2] = [ShiftTerm::pos(3), ShiftTerm::neg(0)];
    let r = Requant::new(&TERMS, 2);
    assert_eq!(r.rescale(8), 14);
    assert_eq!(r.rescale(-8), -14);
}

#[test]
fn quantize_saturates_high_to_255() {
    assert_eq!(CONV1_REQUANT.quantize(1_000_000, 0), 255);
    assert_eq!(CONV1_REQUANT.quantize(1_000_000, 200), 255);
}

#[test]
fn quantize_saturates_low_to_0() {
    assert_eq!(CONV1_REQUANT.quantize(-1_000_000, 0), 0);
    assert_eq!(CONV1_REQUANT.quantize(-1_000_000, 255), 0);
}

#[test]
fn quantize_adds_output_zero_point() {
    assert_eq!(CONV1_REQUANT.quantize(512, 10), 45);
    assert_eq!(CONV2_REQUANT.quantize(1024, 50), 193);
}

#[test]
fn relu_raises_below_zero_point_results() {
    // rescale(-512) = -35; with zero-point 100 the saturated value is 65,
    // which the quantized-space ReLU must lift to exactly 100.
    assert_eq!(CONV1_REQUANT.quantize(-512, 100), 65);
    assert_eq!(CONV1_REQUANT.quantize_relu(-512, 100), 100);
}

#[test]
fn relu_applies_after_saturation() {
    // Saturates to 0 first, then is lifted to the zero-point, never below.
    assert_eq!(CONV1_REQUANT.quantize_relu(-1_000_000, 128), 128);
    // Values above the zero-point pass through untouched.
    assert_eq!(CONV1_REQUANT.quantize_relu(512, 10), 45);
}
