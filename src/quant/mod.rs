//! Multiplier-free requantization.
//!
//! Each layer's real-valued output scale is approximated by an integer
//! multiply-by-shifts followed by a single arithmetic right shift. The shift
//! decompositions are fixed constants carried over from the bit-accurate
//! hardware design; the software and hardware paths must evaluate the exact
//! same sequence to reach the same classification, so they are never to be
//! re-derived from the nominal scales.

/// One term of a shift-decomposed multiplier: `±(acc << shift)`.
#[derive(Clone, Copy, Debug)]
pub struct ShiftTerm {
    pub shift: u32,
    pub negative: bool,
}

impl ShiftTerm {
    pub const fn pos(shift: u32) -> Self {
        ShiftTerm {
            shift,
            negative: false,
        }
    }

    pub const fn neg(shift: u32) -> Self {
        ShiftTerm {
            shift,
            negative: true,
        }
    }
}

/// A per-layer fixed-point rescale: sum the signed shift terms of the
/// accumulator, then apply one arithmetic right shift.
///
/// `terms = [5, 1, 0]` with `post_shift = 9` evaluates
/// `(acc*32 + acc*2 + acc) >> 9`, i.e. `acc * 35 / 512` with truncation
/// toward negative infinity.
#[derive(Clone, Copy, Debug)]
pub struct Requant {
    terms: &'static [ShiftTerm],
    post_shift: u32,
}

/// Rescale for the first convolution's output (×35, >>9).
pub const CONV1_REQUANT: Requant = Requant::new(
    &[ShiftTerm::pos(5), ShiftTerm::pos(1), ShiftTerm::pos(0)],
    9,
);

/// Rescale for the second convolution's output (×143, >>10).
pub const CONV2_REQUANT: Requant = Requant::new(
    &[
        ShiftTerm::pos(7),
        ShiftTerm::pos(3),
        ShiftTerm::pos(2),
        ShiftTerm::pos(1),
        ShiftTerm::pos(0),
    ],
    10,
);

/// Rescale for the first fully-connected layer's output (×75, >>8).
pub const FC1_REQUANT: Requant = Requant::new(
    &[
        ShiftTerm::pos(6),
        ShiftTerm::pos(3),
        ShiftTerm::pos(1),
        ShiftTerm::pos(0),
    ],
    8,
);

impl Requant {
    pub const fn new(terms: &'static [ShiftTerm], post_shift: u32) -> Self {
        Requant { terms, post_shift }
    }

    /// Applies the shift sequence to a raw accumulator.
    ///
    /// Evaluated in i32 throughout, matching the reference design; the fixed
    /// operand bounds of this network keep every intermediate in range.
    pub fn rescale(&self, acc: i32) -> i32 {
        let mut sum: i32 = 0;
        for term in self.terms {
            let v = acc << term.shift;
            if term.negative {
                sum -= v;
            } else {
                sum += v;
            }
        }
        sum >> self.post_shift
    }

    /// Rescales, adds the layer's output zero-point, and saturates to the
    /// unsigned 8-bit range. Saturation is a designed clamp, not an error.
    pub fn quantize(&self, acc: i32, out_zp: u8) -> u8 {
        let v = self.rescale(acc) + out_zp as i32;
        v.clamp(0, 255) as u8
    }

    /// [`Requant::quantize`] followed by the quantized-space ReLU: the result
    /// is clamped up to the output zero-point (the encoding of real 0).
    /// Applied after saturation to the representable range, never before.
    pub fn quantize_relu(&self, acc: i32, out_zp: u8) -> u8 {
        self.quantize(acc, out_zp).max(out_zp)
    }
}
