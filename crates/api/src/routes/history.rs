//! Served Prediction History Route

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::{ApiError, SharedState};
use prediction_log::PredictionRecord;

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of records
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Response for the history endpoint.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub data: Vec<PredictionRecord>,
    pub count: usize,
}

/// Get recently served predictions, newest first.
pub async fn get_predictions(
    State(state): State<SharedState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let state = state.read().await;
    let limit = params.limit.min(500);

    let data = state
        .log
        .recent(limit)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(HistoryResponse {
        count: data.len(),
        data,
    }))
}
