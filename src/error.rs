use thiserror::Error;

/// Errors that can occur while building parameter tables or running inference.
///
/// Shape violations fail fast before any partial computation; the forward pass
/// itself is total and cannot fail once its inputs are validated.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("input image must have 784 samples (28x28, row-major), got {got}")]
    ImageShape { got: usize },

    #[error("{table} table must have {expected} elements, got {got}")]
    TableShape {
        table: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("unrecognized {0} file format")]
    Format(&'static str),

    #[error("no parameters loaded into the accelerator")]
    NotLoaded,

    #[error("failed to read parameter stream")]
    Io(#[from] std::io::Error),
}

/// Result type alias for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
