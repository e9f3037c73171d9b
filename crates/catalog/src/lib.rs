//! Label Registry
//!
//! Ordered class catalogs for the leaf classifiers, plus the static
//! treatment and recommendation lookup tables keyed by class name.
//! Catalog order is the index contract with the classifier output
//! vector and must match the order used at training time.

mod advice;
mod registry;

pub use advice::{recommendations_for, treatment_for, TREATMENT_FALLBACK};
pub use registry::{LabelRegistry, PipelineVariant};
