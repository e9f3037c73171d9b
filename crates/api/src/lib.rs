//! FarmLive Disease Detection API Server
//!
//! REST transport over the leaf classification pipeline: multipart image
//! upload in, disease label with agronomic advice out.

use axum::{
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod routes;

pub use config::{ModelConfig, ServiceConfig};
pub use error::ApiError;

use catalog::LabelRegistry;
use inference_engine::ClassifierEngine;

/// Uploads larger than this are rejected before decoding
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across handlers.
///
/// The engine guards its own one-time initialization and the registry is
/// immutable, so handlers share this without locking.
pub struct AppState {
    /// Lazily-initialized classifier
    pub engine: ClassifierEngine,
    /// Ordered class catalog for the configured variant
    pub registry: LabelRegistry,
    /// Square input edge length for preprocessing
    pub input_size: u32,
    /// Version string
    pub version: String,
}

impl AppState {
    /// Create application state from service configuration
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            engine: ClassifierEngine::new(config.loader_config()),
            registry: LabelRegistry::new(config.variant),
            input_size: config.variant.input_size(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Whether a model handle exists in process memory
    pub model_loaded: bool,
    /// Explicit loader state; `ready` is the only state serving predictions
    pub model_state: String,
}

/// Service info returned at the root path
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: String,
    pub version: String,
    pub endpoints: EndpointListing,
}

#[derive(Debug, Serialize)]
pub struct EndpointListing {
    pub health: String,
    pub predict: String,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/api/health", get(health_handler))
        .route("/api/predict", post(routes::predict::predict_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "API is running".to_string(),
        model_loaded: state.engine.is_loaded(),
        model_state: state.engine.state().as_str().to_string(),
    })
}

/// Service info handler
async fn home_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HomeResponse {
        message: "FarmLive Disease Detection API".to_string(),
        version: state.version.clone(),
        endpoints: EndpointListing {
            health: "/api/health".to_string(),
            predict: "/api/predict (POST with image)".to_string(),
        },
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown
pub async fn run_server(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(&config));
    let app = create_router(state);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
