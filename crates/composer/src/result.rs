//! Argmax selection and advice lookup

use crate::ComposeError;
use catalog::{recommendations_for, treatment_for, LabelRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One classification outcome, derived per request and never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted class name from the catalog
    pub disease: String,
    /// Max probability as a percentage, rounded to 2 decimals
    pub confidence: f64,
    /// Treatment advice for the predicted class
    pub treatment: String,
    /// Care recommendations (3 items for healthy classes, 4 otherwise)
    pub recommendations: Vec<String>,
}

/// Compose a labeled result from a probability vector.
///
/// Selection rule: index of the maximum score, first occurrence on an
/// exact tie. Fails with [`ComposeError::LabelMismatch`] when the vector
/// length disagrees with the catalog.
pub fn compose(
    probabilities: &[f32],
    registry: &LabelRegistry,
) -> Result<PredictionResult, ComposeError> {
    if probabilities.len() != registry.len() {
        return Err(ComposeError::LabelMismatch {
            expected: registry.len(),
            actual: probabilities.len(),
        });
    }

    let (best_index, best_score) = probabilities
        .iter()
        .enumerate()
        .fold((0usize, f32::NEG_INFINITY), |(bi, bs), (i, &s)| {
            if s > bs {
                (i, s)
            } else {
                (bi, bs)
            }
        });

    // Length equality was checked above, so the index is in bounds
    let disease = registry
        .label_at(best_index)
        .ok_or(ComposeError::LabelMismatch {
            expected: registry.len(),
            actual: probabilities.len(),
        })?;

    let confidence = (f64::from(best_score) * 10000.0).round() / 100.0;
    debug!("Predicted {} at {:.2}%", disease, confidence);

    Ok(PredictionResult {
        disease: disease.to_string(),
        confidence,
        treatment: treatment_for(disease).to_string(),
        recommendations: recommendations_for(disease)
            .iter()
            .map(|r| r.to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::PipelineVariant;

    fn registry() -> LabelRegistry {
        LabelRegistry::new(PipelineVariant::PlantVillage)
    }

    #[test]
    fn test_one_hot_vector_selects_argmax_label() {
        let mut probs = vec![0.0f32; 15];
        probs[2] = 0.97;
        let result = compose(&probs, &registry()).unwrap();
        assert_eq!(result.disease, "Potato___Early_blight");
        assert_eq!(result.confidence, 97.00);
    }

    #[test]
    fn test_exact_tie_takes_first_occurrence() {
        let mut probs = vec![0.0f32; 15];
        probs[3] = 0.5;
        probs[9] = 0.5;
        let result = compose(&probs, &registry()).unwrap();
        assert_eq!(result.disease, "Potato___Late_blight");
    }

    #[test]
    fn test_confidence_rounds_to_two_decimals() {
        let mut probs = vec![0.0f32; 15];
        probs[14] = 0.87654;
        let result = compose(&probs, &registry()).unwrap();
        assert_eq!(result.confidence, 87.65);
    }

    #[test]
    fn test_healthy_class_gets_three_recommendations() {
        let mut probs = vec![0.0f32; 15];
        probs[14] = 0.9;
        let result = compose(&probs, &registry()).unwrap();
        assert_eq!(result.disease, "Tomato_healthy");
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn test_disease_class_gets_four_recommendations() {
        let mut probs = vec![0.0f32; 15];
        probs[7] = 0.8;
        let result = compose(&probs, &registry()).unwrap();
        assert_eq!(result.recommendations.len(), 4);
        assert_eq!(
            result.treatment,
            "Emergency treatment - copper fungicide needed"
        );
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let probs = vec![0.1f32; 20];
        match compose(&probs, &registry()) {
            Err(ComposeError::LabelMismatch { expected, actual }) => {
                assert_eq!(expected, 15);
                assert_eq!(actual, 20);
            }
            other => panic!("expected LabelMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_vector_is_a_mismatch() {
        assert!(matches!(
            compose(&[], &registry()),
            Err(ComposeError::LabelMismatch { .. })
        ));
    }
}
