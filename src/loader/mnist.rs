use std::fs::File;
use std::io::Read;

use flate2::read::GzDecoder;
use log::info;

use crate::error::{InferenceError, Result};
use crate::model::IMAGE_PIXELS;

/// Affine scale of the network's input quantization. The training pipeline
/// normalizes pixels to [-1, 1] before quantizing, so the scale spans that
/// range over 255 steps.
const INPUT_SCALE: f32 = 2.0 / 255.0;

/// Quantizes one raw grayscale pixel (0..=255) into the network's input
/// encoding: normalize to [-1, 1], divide by the input scale, add the input
/// zero-point, and clamp to the unsigned 8-bit range.
///
/// Rounding is half-to-even, matching the training pipeline's quantization;
/// the quotient lands exactly on .5 for many gray levels, so the tie rule is
/// part of the encoding.
pub fn quantize_pixel(pixel: u8, input_zp: u8) -> u8 {
    let real = (pixel as f32 / 255.0 - 0.5) / 0.5;
    let q = (real / INPUT_SCALE).round_ties_even() as i32 + input_zp as i32;
    q.clamp(0, 255) as u8
}

fn open_maybe_gz(path: &str) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if path.ends_with(".gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

fn read_be_u32<R: Read + ?Sized>(reader: &mut R) -> Result<u32> {
    let mut buf4 = [0u8; 4];
    reader.read_exact(&mut buf4)?;
    Ok(u32::from_be_bytes(buf4))
}

/// MNIST image dataset loader.
///
/// Reads the IDX3 image format (optionally gzip-compressed) and hands out
/// individual 28x28 images as flat 784-sample vectors, already quantized
/// into the network's input encoding.
pub struct MnistImages {
    pixels: Vec<u8>,
    num_imgs: usize,
}

impl MnistImages {
    pub fn open(path: &str, input_zp: u8) -> Result<Self> {
        let mut reader = open_maybe_gz(path)?;

        let magic = read_be_u32(reader.as_mut())?;
        if magic != 0x0000_0803 {
            return Err(InferenceError::Format("MNIST image"));
        }
        let num_imgs = read_be_u32(reader.as_mut())? as usize;
        let num_rows = read_be_u32(reader.as_mut())? as usize;
        let num_cols = read_be_u32(reader.as_mut())? as usize;
        if num_rows * num_cols != IMAGE_PIXELS {
            return Err(InferenceError::TableShape {
                table: "MNIST image dims",
                expected: IMAGE_PIXELS,
                got: num_rows * num_cols,
            });
        }

        let mut pixels = vec![0u8; num_imgs * IMAGE_PIXELS];
        reader.read_exact(&mut pixels)?;
        for p in pixels.iter_mut() {
            *p = quantize_pixel(*p, input_zp);
        }

        info!("loaded {} MNIST images from {}", num_imgs, path);
        Ok(MnistImages { pixels, num_imgs })
    }

    /// The idx-th image as a flat row-major 784-sample slice.
    pub fn at(&self, idx: usize) -> &[u8] {
        &self.pixels[idx * IMAGE_PIXELS..(idx + 1) * IMAGE_PIXELS]
    }

    pub fn len(&self) -> usize {
        self.num_imgs
    }

    pub fn is_empty(&self) -> bool {
        self.num_imgs == 0
    }
}

/// MNIST label dataset loader (IDX1 format, optionally gzip-compressed).
pub struct MnistLabels {
    labels: Vec<u8>,
}

impl MnistLabels {
    pub fn open(path: &str) -> Result<Self> {
        let mut reader = open_maybe_gz(path)?;

        let magic = read_be_u32(reader.as_mut())?;
        if magic != 0x0000_0801 {
            return Err(InferenceError::Format("MNIST label"));
        }
        let num_labels = read_be_u32(reader.as_mut())? as usize;

        let mut labels = vec![0u8; num_labels];
        reader.read_exact(&mut labels)?;

        info!("loaded {} MNIST labels from {}", num_labels, path);
        Ok(MnistLabels { labels })
    }

    pub fn at(&self, idx: usize) -> u8 {
        self.labels[idx]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
