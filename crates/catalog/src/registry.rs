//! Class catalogs and pipeline variant parameterization

use serde::{Deserialize, Serialize};

/// PlantVillage disease catalog, in training order (15 classes, 128x128 input)
const PLANT_VILLAGE_LABELS: [&str; 15] = [
    "Pepper__bell___Bacterial_spot",
    "Pepper__bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Tomato_Bacterial_spot",
    "Tomato_Early_blight",
    "Tomato_Late_blight",
    "Tomato_Leaf_Mold",
    "Tomato_Septoria_leaf_spot",
    "Tomato_Spider_mites_Two_spotted_spider_mite",
    "Tomato__Target_Spot",
    "Tomato__Tomato_YellowLeaf__Curl_Virus",
    "Tomato__Tomato_mosaic_virus",
    "Tomato_healthy",
];

/// Coarse crop-condition catalog (4 classes, 224x224 input)
const CROP_GENERIC_LABELS: [&str; 4] = [
    "Healthy",
    "Diseased",
    "Pest Infected",
    "Nutrient Deficiency",
];

/// Deployment variant of the classification pipeline.
///
/// Image size and class catalog are configuration inputs, not code paths:
/// both variants run through the same preprocess/infer/compose pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineVariant {
    /// 15-class PlantVillage disease model, 128x128 input
    PlantVillage,
    /// 4-class generic crop-condition model, 224x224 input
    CropGeneric,
}

impl Default for PipelineVariant {
    fn default() -> Self {
        PipelineVariant::PlantVillage
    }
}

impl PipelineVariant {
    /// Square input edge length expected by the variant's classifier
    pub fn input_size(&self) -> u32 {
        match self {
            PipelineVariant::PlantVillage => 128,
            PipelineVariant::CropGeneric => 224,
        }
    }
}

/// Ordered class catalog for one deployment variant.
///
/// Index position is the contract with the classifier output vector;
/// the catalog is built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct LabelRegistry {
    variant: PipelineVariant,
    labels: &'static [&'static str],
}

impl LabelRegistry {
    /// Build the registry for a variant
    pub fn new(variant: PipelineVariant) -> Self {
        let labels: &'static [&'static str] = match variant {
            PipelineVariant::PlantVillage => &PLANT_VILLAGE_LABELS,
            PipelineVariant::CropGeneric => &CROP_GENERIC_LABELS,
        };
        Self { variant, labels }
    }

    /// Variant this registry was built for
    pub fn variant(&self) -> PipelineVariant {
        self.variant
    }

    /// Ordered class names
    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Number of classes (the classifier's expected output dimensionality)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Class name at a given output index
    pub fn label_at(&self, index: usize) -> Option<&'static str> {
        self.labels.get(index).copied()
    }
}

impl Default for LabelRegistry {
    fn default() -> Self {
        Self::new(PipelineVariant::default())
    }
}
