//! Standalone CLI predictor
//!
//! Classifies a single image file and prints a JSON result to stdout.
//! Errors print `{"error": ...}` and exit nonzero, so callers can treat
//! stdout as the whole interface.

use api::{AppState, ServiceConfig};
use serde_json::json;
use std::process;

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let image_path = match args.next() {
        Some(path) => path,
        None => {
            println!("{}", json!({"error": "No image path provided"}));
            process::exit(1);
        }
    };

    match run(&image_path).await {
        Ok(output) => println!("{}", output),
        Err(message) => {
            println!("{}", json!({ "error": message }));
            process::exit(1);
        }
    }
}

async fn run(image_path: &str) -> Result<String, String> {
    let config = ServiceConfig::load().map_err(|e| e.to_string())?;
    let state = AppState::new(&config);

    let bytes = std::fs::read(image_path).map_err(|e| e.to_string())?;

    let model = state.engine.acquire().await.map_err(|e| e.to_string())?;
    let tensor =
        preprocess::preprocess(&bytes, state.input_size).map_err(|e| e.to_string())?;
    let scores = model.infer(&tensor).map_err(|e| e.to_string())?;
    let result = composer::compose(&scores, &state.registry).map_err(|e| e.to_string())?;

    let output = json!({
        "prediction": result.disease,
        "confidence": format!("{:.2}", result.confidence),
        "scores": scores,
    });
    Ok(output.to_string())
}
