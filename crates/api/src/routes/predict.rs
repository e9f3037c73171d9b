//! Prediction route: multipart image upload through the full pipeline

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::{ApiError, AppState};
use composer::PredictionResult;

/// Success envelope for `/api/predict`
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: PredictionResult,
}

/// POST /api/predict - classify an uploaded leaf photo
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut image_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        if field.file_name().map_or(true, str::is_empty) {
            return Err(ApiError::NoImageSelected);
        }
        image_bytes = Some(
            field
                .bytes()
                .await
                .map_err(|e| ApiError::Multipart(e.to_string()))?,
        );
        break;
    }

    let bytes = image_bytes.ok_or(ApiError::NoImageProvided)?;
    let result = classify(&state, &bytes).await?;

    info!(
        "Classified upload as {} ({:.2}% confidence)",
        result.disease, result.confidence
    );

    Ok(Json(PredictResponse {
        success: true,
        result,
    }))
}

/// Run the synchronous pipeline end-to-end: acquire model, preprocess,
/// forward pass, compose. Each stage's failure maps to its own kind.
async fn classify(state: &AppState, bytes: &[u8]) -> Result<PredictionResult, ApiError> {
    let model = state.engine.acquire().await?;
    let tensor = preprocess::preprocess(bytes, state.input_size)?;
    let scores = model.infer(&tensor)?;
    Ok(composer::compose(&scores, &state.registry)?)
}
