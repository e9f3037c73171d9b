//! ONNX Inference Engine
//!
//! Resolves the trained classifier artifact from an ordered list of
//! candidate paths, caches the loaded model for the process lifetime,
//! and runs single-pass classification with tract-onnx.

mod engine;
mod loader;

pub use engine::ClassifierEngine;
pub use loader::{LoadedModel, LoaderConfig, ModelState, WeightsSource};

use thiserror::Error;

/// Errors during model acquisition and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error("No loadable model artifact among {attempted} candidate paths")]
    AllCandidatesFailed { attempted: usize },
    #[error("Model unavailable: task-trained weights are not loaded")]
    ModelUnavailable,
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}
