//! Runs the software oracle over an MNIST test set and reports accuracy.
//!
//! Usage: `mnist_eval <params.bin> <images.idx[.gz]> <labels.idx[.gz]> [count]`

use std::env;
use std::fs::File;
use std::process;

use log::{error, info};

use quantcnn::accel::{Accelerator, SoftwareOracle};
use quantcnn::loader::{MnistImages, MnistLabels};
use quantcnn::model::CnnParams;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("usage: {} <params.bin> <images.idx[.gz]> <labels.idx[.gz]> [count]", args[0]);
        process::exit(2);
    }

    let params = match File::open(&args[1]).map_err(Into::into).and_then(|mut f| CnnParams::read_from(&mut f)) {
        Ok(p) => p,
        Err(e) => {
            error!("failed to load parameters from {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let images = match MnistImages::open(&args[2], params.input_zp) {
        Ok(i) => i,
        Err(e) => {
            error!("failed to load images from {}: {}", args[2], e);
            process::exit(1);
        }
    };
    let labels = match MnistLabels::open(&args[3]) {
        Ok(l) => l,
        Err(e) => {
            error!("failed to load labels from {}: {}", args[3], e);
            process::exit(1);
        }
    };

    let count = args
        .get(4)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(images.len())
        .min(images.len())
        .min(labels.len());

    let mut oracle = SoftwareOracle::new();
    oracle.load(params);

    let mut correct = 0usize;
    for i in 0..count {
        let predicted = match oracle.infer(images.at(i)) {
            Ok(c) => c,
            Err(e) => {
                error!("inference failed on sample {}: {}", i, e);
                process::exit(1);
            }
        };
        let expected = labels.at(i) as usize;
        if predicted == expected {
            correct += 1;
        } else {
            info!("sample {}: predicted {}, label {}", i, predicted, expected);
        }
    }

    println!(
        "{}/{} correct ({:.2}%)",
        correct,
        count,
        100.0 * correct as f64 / count as f64
    );
}
