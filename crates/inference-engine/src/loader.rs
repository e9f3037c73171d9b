//! Model resolution with ordered candidate-path fallback

use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tract_onnx::prelude::*;
use tracing::{info, warn};

type RunnablePlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Task-trained model candidates, tried in order; first loadable wins
    pub candidates: Vec<PathBuf>,
    /// Generic pretrained backbone, loaded only when every candidate fails.
    /// A model built from this alone has an untrained classification head
    /// and is never used to answer predictions.
    pub backbone_fallback: Option<PathBuf>,
    /// Square input edge length the model expects
    pub input_size: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                PathBuf::from("public/models/plant_disease.onnx"),
                PathBuf::from("plant_disease.onnx"),
            ],
            backbone_fallback: None,
            input_size: 128,
        }
    }
}

/// Where the loaded weights came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightsSource {
    /// Full task-trained classifier
    TaskTrained(PathBuf),
    /// Generic backbone only; predictions from this are meaningless
    BackboneOnly(PathBuf),
}

/// Explicit loader state, surfaced on the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    /// No load attempt yet
    Uninitialized,
    /// Task-trained weights loaded
    Ready,
    /// Only the generic backbone loaded; predictions are refused
    Degraded,
    /// Nothing loaded; the next acquire retries
    Failed,
}

impl ModelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelState::Uninitialized => "uninitialized",
            ModelState::Ready => "ready",
            ModelState::Degraded => "degraded",
            ModelState::Failed => "failed",
        }
    }
}

/// A loaded, optimized, runnable classifier bound to one input shape.
/// Immutable after load; shared read-only across requests.
pub struct LoadedModel {
    plan: RunnablePlan,
    source: WeightsSource,
}

impl LoadedModel {
    pub fn source(&self) -> &WeightsSource {
        &self.source
    }

    /// Single blocking forward pass: NHWC tensor in, per-class scores out.
    /// No batching beyond batch size 1, no timeout, no retry.
    pub fn infer(&self, tensor: &preprocess::ImageTensor) -> Result<Vec<f32>, InferenceError> {
        let data = tensor
            .as_slice()
            .ok_or_else(|| InferenceError::InferenceFailed("non-contiguous input".into()))?;
        let input = Tensor::from_shape(tensor.shape(), data)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        Ok(scores.iter().copied().collect())
    }
}

/// Try each candidate in order; first existing, loadable artifact wins.
/// Individual candidate failures are non-fatal. When every candidate
/// fails, the backbone fallback (if configured) yields a degraded model;
/// otherwise the whole acquisition fails.
pub(crate) fn resolve(config: &LoaderConfig) -> Result<LoadedModel, InferenceError> {
    for path in &config.candidates {
        if !path.exists() {
            warn!("Model candidate {} does not exist, trying next", path.display());
            continue;
        }
        match load_plan(path, config.input_size) {
            Ok(plan) => {
                info!("Loaded task-trained model from {}", path.display());
                return Ok(LoadedModel {
                    plan,
                    source: WeightsSource::TaskTrained(path.clone()),
                });
            }
            Err(e) => {
                warn!("Failed to load model from {}: {}", path.display(), e);
            }
        }
    }

    if let Some(backbone) = &config.backbone_fallback {
        if let Ok(plan) = load_plan(backbone, config.input_size) {
            warn!(
                "All {} candidates failed; loaded generic backbone from {}",
                config.candidates.len(),
                backbone.display()
            );
            return Ok(LoadedModel {
                plan,
                source: WeightsSource::BackboneOnly(backbone.clone()),
            });
        }
    }

    Err(InferenceError::AllCandidatesFailed {
        attempted: config.candidates.len(),
    })
}

fn load_plan(path: &Path, input_size: u32) -> TractResult<RunnablePlan> {
    let size = input_size as usize;
    tract_onnx::onnx()
        .model_for_path(path)?
        .with_input_fact(
            0,
            InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3)),
        )?
        .into_optimized()?
        .into_runnable()
}
