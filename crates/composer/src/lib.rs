//! Result Composer
//!
//! Turns a classifier probability vector into a labeled, human-readable
//! prediction using the label registry.

mod result;

pub use result::{compose, PredictionResult};

use thiserror::Error;

/// Errors during result composition
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Output vector length disagrees with the class catalog. A mismatched
    /// model artifact must fail loudly here, never mis-index silently.
    #[error("classifier output has {actual} classes, catalog expects {expected}")]
    LabelMismatch { expected: usize, actual: usize },
}
