//! Prediction Route

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ApiError, SharedState};
use prediction_log::PredictionRecord;

/// Single flight attribute triple, upstream wire names.
#[derive(Debug, Deserialize)]
pub struct FlightPayload {
    #[serde(rename = "OPERA")]
    pub opera: String,
    #[serde(rename = "TIPOVUELO")]
    pub tipovuelo: String,
    #[serde(rename = "MES")]
    pub mes: u32,
}

/// Request body for predictions.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub flights: Vec<FlightPayload>,
}

/// Response body: one 0/1 label per input flight, same order.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predict: Vec<u8>,
}

/// Predict flight delays.
///
/// Validation happens here, against the fixed catalogs, before the core is
/// called; encoder-side failures are a last-resort guard. Schema rejections
/// from the Json extractor are downgraded from 422 to 400 to match the
/// upstream contract.
pub async fn post_predict(
    State(state): State<SharedState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    counter!("delay_api_requests_total").increment(1);

    let state = state.read().await;

    let records = state
        .validator
        .validate_batch(
            request
                .flights
                .iter()
                .map(|flight| (flight.opera.as_str(), flight.tipovuelo.as_str(), flight.mes)),
        )
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if !state.classifier.is_trained() && !state.config.allow_untrained_fallback {
        return Err(ApiError::ServiceUnavailable(
            "model not trained".to_string(),
        ));
    }

    let features = state
        .encoder
        .encode(&records)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let predictions = state.classifier.predict(&features);

    counter!("delay_predictions_total").increment(predictions.len() as u64);

    let timestamp_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    for (record, label) in records.iter().zip(&predictions) {
        let entry = PredictionRecord {
            id: 0,
            timestamp_ms,
            operator: record.operator.clone(),
            flight_type: record.flight_type.as_str().to_string(),
            month: record.month,
            label: *label,
        };
        if let Err(e) = state.log.insert(entry) {
            warn!("failed to log prediction: {e}");
        }
    }

    Ok(Json(PredictResponse {
        predict: predictions,
    }))
}
