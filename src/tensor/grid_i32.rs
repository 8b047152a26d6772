use std::fmt;

/// A 2D signed 32-bit accumulator grid.
///
/// Holds pre-requantization dot-product sums. Never outlives the layer
/// computation that produced it. For the fixed operand ranges of this network
/// (3x3 kernels, 8-bit operands, at most 5 accumulated input channels) the
/// values cannot overflow i32; see [`crate::layers::conv`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GridI32 {
    pub h: usize,
    pub w: usize,
    pub data: Vec<i32>,
}

impl GridI32 {
    pub fn new(h: usize, w: usize) -> Self {
        GridI32 {
            h,
            w,
            data: vec![0i32; h * w],
        }
    }

    /// A grid with every element set to `val`. Used to seed an accumulator
    /// with a layer bias before channel contributions are summed in.
    pub fn splat(h: usize, w: usize, val: i32) -> Self {
        GridI32 {
            h,
            w,
            data: vec![val; h * w],
        }
    }

    pub fn get(&self, h: usize, w: usize) -> i32 {
        self.data[h * self.w + w]
    }

    pub fn add(&mut self, h: usize, w: usize, val: i32) {
        self.data[h * self.w + w] += val;
    }
}

impl fmt::Display for GridI32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} (i32)", self.h, self.w)
    }
}
