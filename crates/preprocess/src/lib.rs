//! Image Preprocessor
//!
//! Converts arbitrary uploaded image bytes into the fixed-shape,
//! normalized NHWC tensor the classifier expects.

mod tensor;

pub use tensor::{preprocess, ImageTensor};

use thiserror::Error;

/// Errors during preprocessing.
///
/// Sub-kinds stay distinguishable so tests and logs can tell a decode
/// failure from an empty upload.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("empty image payload")]
    EmptyInput,
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}
