//! Request-level error taxonomy and HTTP status mapping
//!
//! Every pipeline failure is caught here and converted into a structured
//! `{"error": ...}` body; nothing escapes uncaught to the transport.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use composer::ComposeError;
use inference_engine::InferenceError;
use preprocess::PreprocessError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failure kinds surfaced by the prediction endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image provided")]
    NoImageProvided,
    #[error("No image selected")]
    NoImageSelected,
    #[error("Malformed upload: {0}")]
    Multipart(String),
    #[error("Failed to process image")]
    Preprocess(#[from] PreprocessError),
    #[error("Model failed to load")]
    Model(InferenceError),
    #[error("Prediction failed: {0}")]
    Inference(String),
    #[error("Prediction failed: {0}")]
    Compose(#[from] ComposeError),
}

impl From<InferenceError> for ApiError {
    fn from(e: InferenceError) -> Self {
        match e {
            InferenceError::InferenceFailed(msg) => ApiError::Inference(msg),
            other => ApiError::Model(other),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NoImageProvided
            | ApiError::NoImageSelected
            | ApiError::Multipart(_)
            | ApiError::Preprocess(_) => StatusCode::BAD_REQUEST,
            ApiError::Model(_) | ApiError::Inference(_) | ApiError::Compose(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error body paired with an HTTP status
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Keep the failure sub-kind in the logs even when the wire
        // message is generic
        match &self {
            ApiError::Preprocess(inner) => warn!("Image preprocessing failed: {}", inner),
            ApiError::Model(inner) => error!("Model acquisition failed: {}", inner),
            other if status.is_server_error() => error!("Request failed: {}", other),
            other => warn!("Request rejected: {}", other),
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
