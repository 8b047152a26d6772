use std::io::Read;

use log::info;

use crate::error::{InferenceError, Result};
use crate::layers::KERNEL_SIZE;

use super::{CONV_CHANNELS, FC1_INPUTS, NUM_CLASSES};

const KERNEL_TAPS: usize = KERNEL_SIZE * KERNEL_SIZE;

/// Parameters of one convolution layer.
///
/// Weights are flat, indexed `[out_channel][in_channel][row][col]` row-major.
#[derive(Clone, Debug)]
pub struct ConvParams {
    pub in_channels: usize,
    pub out_channels: usize,
    pub weights: Vec<i8>,
    pub weight_zp: u8,
    pub bias: Vec<i32>,
    pub out_zp: u8,
}

impl ConvParams {
    pub fn new(
        table: &'static str,
        in_channels: usize,
        out_channels: usize,
        weights: Vec<i8>,
        weight_zp: u8,
        bias: Vec<i32>,
        out_zp: u8,
    ) -> Result<Self> {
        let expected = out_channels * in_channels * KERNEL_TAPS;
        if weights.len() != expected {
            return Err(InferenceError::TableShape {
                table,
                expected,
                got: weights.len(),
            });
        }
        if bias.len() != out_channels {
            return Err(InferenceError::TableShape {
                table,
                expected: out_channels,
                got: bias.len(),
            });
        }
        Ok(ConvParams {
            in_channels,
            out_channels,
            weights,
            weight_zp,
            bias,
            out_zp,
        })
    }

    /// The 3x3 kernel for one (output, input) channel pair, row-major.
    pub fn kernel(&self, oc: usize, ic: usize) -> &[i8] {
        let start = (oc * self.in_channels + ic) * KERNEL_TAPS;
        &self.weights[start..start + KERNEL_TAPS]
    }
}

/// Parameters of one fully-connected layer.
///
/// Weights are flat, indexed `[out_feature][in_feature]`.
#[derive(Clone, Debug)]
pub struct FcParams {
    pub in_features: usize,
    pub out_features: usize,
    pub weights: Vec<i8>,
    pub weight_zp: u8,
    pub bias: Vec<i32>,
    pub out_zp: u8,
}

impl FcParams {
    pub fn new(
        table: &'static str,
        in_features: usize,
        out_features: usize,
        weights: Vec<i8>,
        weight_zp: u8,
        bias: Vec<i32>,
        out_zp: u8,
    ) -> Result<Self> {
        let expected = out_features * in_features;
        if weights.len() != expected {
            return Err(InferenceError::TableShape {
                table,
                expected,
                got: weights.len(),
            });
        }
        if bias.len() != out_features {
            return Err(InferenceError::TableShape {
                table,
                expected: out_features,
                got: bias.len(),
            });
        }
        Ok(FcParams {
            in_features,
            out_features,
            weights,
            weight_zp,
            bias,
            out_zp,
        })
    }

    /// One output feature's weight row.
    pub fn row(&self, o: usize) -> &[i8] {
        let start = o * self.in_features;
        &self.weights[start..start + self.in_features]
    }
}

/// The complete, immutable parameter set of the fixed network.
///
/// Loaded once before the first inference and never mutated; inference calls
/// only borrow it, so a single set can serve any number of threads.
#[derive(Clone, Debug)]
pub struct CnnParams {
    pub input_zp: u8,
    pub conv1: ConvParams,
    pub conv2: ConvParams,
    pub fc1: FcParams,
    pub fc2: FcParams,
}

impl CnnParams {
    /// Assembles a parameter set, validating every table shape up front.
    pub fn new(
        input_zp: u8,
        conv1: ConvParams,
        conv2: ConvParams,
        fc1: FcParams,
        fc2: FcParams,
    ) -> Result<Self> {
        check_dims("conv1 weights", conv1.in_channels, 1, conv1.out_channels, CONV_CHANNELS)?;
        check_dims(
            "conv2 weights",
            conv2.in_channels,
            CONV_CHANNELS,
            conv2.out_channels,
            CONV_CHANNELS,
        )?;
        check_dims("fc1 weights", fc1.in_features, FC1_INPUTS, fc1.out_features, NUM_CLASSES)?;
        check_dims("fc2 weights", fc2.in_features, NUM_CLASSES, fc2.out_features, NUM_CLASSES)?;
        Ok(CnnParams {
            input_zp,
            conv1,
            conv2,
            fc1,
            fc2,
        })
    }

    /// Reads a parameter set from a raw little-endian stream.
    ///
    /// Layout, in order: input zero-point (u8); then for each of conv1,
    /// conv2, fc1, fc2: all weights (i8), weight zero-point (u8), all biases
    /// (i32 LE), output zero-point (u8). Table sizes are fixed by the
    /// topology, so the stream carries no headers.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let input_zp = read_u8(reader)?;

        let (w, wzp, b, ozp) = read_layer(reader, CONV_CHANNELS * KERNEL_TAPS, CONV_CHANNELS)?;
        let conv1 = ConvParams::new("conv1 weights", 1, CONV_CHANNELS, w, wzp, b, ozp)?;

        let (w, wzp, b, ozp) = read_layer(
            reader,
            CONV_CHANNELS * CONV_CHANNELS * KERNEL_TAPS,
            CONV_CHANNELS,
        )?;
        let conv2 = ConvParams::new("conv2 weights", CONV_CHANNELS, CONV_CHANNELS, w, wzp, b, ozp)?;

        let (w, wzp, b, ozp) = read_layer(reader, NUM_CLASSES * FC1_INPUTS, NUM_CLASSES)?;
        let fc1 = FcParams::new("fc1 weights", FC1_INPUTS, NUM_CLASSES, w, wzp, b, ozp)?;

        let (w, wzp, b, ozp) = read_layer(reader, NUM_CLASSES * NUM_CLASSES, NUM_CLASSES)?;
        let fc2 = FcParams::new("fc2 weights", NUM_CLASSES, NUM_CLASSES, w, wzp, b, ozp)?;

        info!("loaded CNN parameter tables (input_zp={})", input_zp);
        CnnParams::new(input_zp, conv1, conv2, fc1, fc2)
    }
}

fn check_dims(
    table: &'static str,
    got_in: usize,
    want_in: usize,
    got_out: usize,
    want_out: usize,
) -> Result<()> {
    if got_in != want_in || got_out != want_out {
        return Err(InferenceError::TableShape {
            table,
            expected: want_out * want_in,
            got: got_out * got_in,
        });
    }
    Ok(())
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_layer<R: Read>(
    reader: &mut R,
    num_weights: usize,
    num_bias: usize,
) -> Result<(Vec<i8>, u8, Vec<i32>, u8)> {
    let mut wbuf = vec![0u8; num_weights];
    reader.read_exact(&mut wbuf)?;
    let weights: Vec<i8> = wbuf.iter().map(|&b| b as i8).collect();

    let weight_zp = read_u8(reader)?;

    let mut bias = Vec::with_capacity(num_bias);
    let mut buf4 = [0u8; 4];
    for _ in 0..num_bias {
        reader.read_exact(&mut buf4)?;
        bias.push(i32::from_le_bytes(buf4));
    }

    let out_zp = read_u8(reader)?;
    Ok((weights, weight_zp, bias, out_zp))
}
