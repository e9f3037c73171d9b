//! Service configuration
//!
//! Defaults look for the model under `public/models/` first, then the
//! repo root; a `farmlive.toml` file and `FARMLIVE_*` environment
//! variables override them.

use catalog::PipelineVariant;
use inference_engine::LoaderConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address for the HTTP server
    pub bind_addr: String,
    /// Which classifier deployment this process serves
    pub variant: PipelineVariant,
    /// Model artifact locations
    pub model: ModelConfig,
}

/// Model artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Task-trained candidates, tried in order
    pub candidates: Vec<PathBuf>,
    /// Optional generic backbone; loading it alone marks the process degraded
    pub backbone_fallback: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            variant: PipelineVariant::PlantVillage,
            model: ModelConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                PathBuf::from("public/models/plant_disease.onnx"),
                PathBuf::from("plant_disease.onnx"),
            ],
            backbone_fallback: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from file and environment, falling back to defaults
    pub fn load() -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::with_name("farmlive").required(false))
            .add_source(::config::Environment::with_prefix("FARMLIVE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Loader configuration for the configured variant
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            candidates: self.model.candidates.clone(),
            backbone_fallback: self.model.backbone_fallback.clone(),
            input_size: self.variant.input_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidate_paths_and_bind_addr() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.variant, PipelineVariant::PlantVillage);
        assert_eq!(config.model.candidates.len(), 2);
        assert_eq!(
            config.model.candidates[0],
            PathBuf::from("public/models/plant_disease.onnx")
        );
    }

    #[test]
    fn test_loader_config_follows_variant_input_size() {
        let mut config = ServiceConfig::default();
        config.variant = PipelineVariant::CropGeneric;
        assert_eq!(config.loader_config().input_size, 224);
    }
}
