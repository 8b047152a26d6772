use std::fmt;

use crate::error::{InferenceError, Result};

/// A 2D unsigned 8-bit activation grid.
///
/// Layout is row-major. Values are affine-quantized: the real value is
/// `scale * (sample - zero_point)` for the owning layer's scale and zero-point.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GridU8 {
    pub h: usize,
    pub w: usize,
    pub data: Vec<u8>,
}

impl GridU8 {
    pub fn new(h: usize, w: usize) -> Self {
        GridU8 {
            h,
            w,
            data: vec![0u8; h * w],
        }
    }

    /// Wraps a row-major flat slice. Fails if the length does not match `h * w`.
    pub fn from_slice(h: usize, w: usize, data: &[u8]) -> Result<Self> {
        if data.len() != h * w {
            return Err(InferenceError::TableShape {
                table: "activation grid",
                expected: h * w,
                got: data.len(),
            });
        }
        Ok(GridU8 {
            h,
            w,
            data: data.to_vec(),
        })
    }

    pub fn get(&self, h: usize, w: usize) -> u8 {
        self.data[h * self.w + w]
    }

    pub fn set(&mut self, h: usize, w: usize, val: u8) {
        self.data[h * self.w + w] = val;
    }

    pub fn fill(&mut self, val: u8) {
        self.data.fill(val);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for GridU8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} (u8)", self.h, self.w)
    }
}
