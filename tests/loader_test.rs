use quantcnn::loader::quantize_pixel;

#[test]
fn pixel_extremes_map_to_known_codes() {
    // Black (-1.0 after normalization) rescales to -127 and lands on 0;
    // white rescales to +127 and lands on 254. The exact codes follow the
    // training pipeline's f32 scale, which sits a hair above 2/255.
    assert_eq!(quantize_pixel(0, 127), 0);
    assert_eq!(quantize_pixel(255, 127), 254);
}

#[test]
fn half_ties_round_to_even() {
    // Pixel 33 rescales to exactly -94.5, pixel 34 to exactly -93.5; both
    // round to the even -94 and share code 33. Half-away rounding would put
    // pixel 33 one code lower, off the reference encoding.
    assert_eq!(quantize_pixel(33, 127), 33);
    assert_eq!(quantize_pixel(34, 127), 33);
}

#[test]
fn pixel_quantization_is_monotonic() {
    let mut prev = quantize_pixel(0, 127);
    for p in 1..=255u8 {
        let q = quantize_pixel(p, 127);
        assert!(q >= prev, "quantization must not invert ordering at {}", p);
        prev = q;
    }
}

#[test]
fn zero_point_shifts_the_encoding() {
    // A mid-gray pixel should land near the zero-point itself.
    let q = quantize_pixel(128, 127);
    assert!((126..=129).contains(&q), "mid-gray mapped to {}", q);
}
