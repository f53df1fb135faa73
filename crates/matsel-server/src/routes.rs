use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::payload::extract_features;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub prediction: i32,
    pub usable: bool,
    /// Present only when the model can estimate probabilities.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub probability: Option<f32>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, ApiError> {
    let columns = state.feature_columns();
    let row = extract_features(&body, columns)?;

    let x = Array2::from_shape_vec((1, row.len()), row.iter().map(|&v| v as f32).collect())
        .map_err(|e| ApiError::internal(format!("Failed to build feature row: {}", e)))?;

    let model = state.model();
    let prediction = model
        .predict(&x)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .first()
        .copied()
        .ok_or_else(|| ApiError::internal("Model returned no prediction"))?;

    let probability = model
        .predict_proba(&x)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .and_then(|probs| probs.first().copied());

    log::debug!(
        "{} predicted {} (p={:?}) for {:?}",
        model.name(),
        prediction,
        probability,
        row
    );

    Ok(Json(PredictionResponse {
        prediction,
        usable: prediction != 0,
        probability,
    }))
}
