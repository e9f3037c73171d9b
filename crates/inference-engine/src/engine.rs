//! Process-wide classifier handle with one-time initialization

use crate::loader::{self, LoadedModel, LoaderConfig, ModelState, WeightsSource};
use crate::InferenceError;
use std::sync::PoisonError;
use std::sync::RwLock;
use tokio::sync::OnceCell;
use tracing::info;

/// Lazily-initialized, process-wide classifier.
///
/// The first `acquire` resolves the model through the candidate-path
/// fallback and caches the handle; concurrent first requests are
/// serialized by the cell so the artifact is read exactly once. The
/// handle is immutable after load and never re-resolved while it
/// exists; a failed attempt leaves the cell empty so a later request
/// can retry.
pub struct ClassifierEngine {
    config: LoaderConfig,
    slot: OnceCell<LoadedModel>,
    state: RwLock<ModelState>,
}

impl ClassifierEngine {
    pub fn new(config: LoaderConfig) -> Self {
        info!(
            "Creating classifier engine ({} candidate paths, {}x{} input)",
            config.candidates.len(),
            config.input_size,
            config.input_size
        );
        Self {
            config,
            slot: OnceCell::new(),
            state: RwLock::new(ModelState::Uninitialized),
        }
    }

    /// Get the loaded model, resolving it on first use.
    ///
    /// A model whose weights came from the generic backbone alone is
    /// tracked as `Degraded` and refused here: its classification head
    /// is untrained, so serving predictions from it would be silently
    /// meaningless.
    pub async fn acquire(&self) -> Result<&LoadedModel, InferenceError> {
        let result = self
            .slot
            .get_or_try_init(|| async { loader::resolve(&self.config) })
            .await;

        match result {
            Ok(model) => {
                match model.source() {
                    WeightsSource::TaskTrained(_) => {
                        self.set_state(ModelState::Ready);
                        Ok(model)
                    }
                    WeightsSource::BackboneOnly(_) => {
                        self.set_state(ModelState::Degraded);
                        Err(InferenceError::ModelUnavailable)
                    }
                }
            }
            Err(e) => {
                self.set_state(ModelState::Failed);
                Err(e)
            }
        }
    }

    /// Whether a model handle currently exists in process memory
    /// (regardless of whether it is properly trained)
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Explicit loader state for the health surface
    pub fn state(&self) -> ModelState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, next: ModelState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
