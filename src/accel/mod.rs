//! The hardware offload boundary.
//!
//! A production build binds [`Accelerator`] to the dedicated inference
//! hardware; tests and validation runs use [`SoftwareOracle`], which routes
//! through the integer pipeline in this crate. The two implementations must
//! agree on the classification for every input, which is the whole point of
//! keeping the boundary this narrow.

use log::info;

use crate::error::{InferenceError, Result};
use crate::model::{CnnParams, QuantCnn};

/// An engine that can hold the network's parameter tables and classify
/// images with them.
pub trait Accelerator {
    /// Installs the parameter tables. Must be called before [`Accelerator::infer`].
    fn load(&mut self, params: CnnParams);

    /// Classifies one 784-sample image, returning the class index in `0..10`.
    fn infer(&self, pixels: &[u8]) -> Result<usize>;
}

/// The software reference implementation of [`Accelerator`].
#[derive(Default)]
pub struct SoftwareOracle {
    net: Option<QuantCnn>,
}

impl SoftwareOracle {
    pub fn new() -> Self {
        SoftwareOracle { net: None }
    }
}

impl Accelerator for SoftwareOracle {
    fn load(&mut self, params: CnnParams) {
        info!("software oracle: parameters loaded");
        self.net = Some(QuantCnn::new(params));
    }

    fn infer(&self, pixels: &[u8]) -> Result<usize> {
        let net = self.net.as_ref().ok_or(InferenceError::NotLoaded)?;
        net.classify(pixels)
    }
}
