//! JSON prediction endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::assess_blocking;
use crate::api::error::ApiError;
use crate::api::types::{AppContext, PredictionResponse};
use crate::form::PredictRequest;

/// `POST /api/predict` — score one record sent as JSON.
///
/// Fields are optional; absent ones reach the model as `"Unknown"`.
/// Malformed or wrong-typed bodies get the same error envelope as
/// out-of-range values.
pub async fn predict(
    State(ctx): State<AppContext>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = payload?;
    let record = request.into_record()?;
    let assessment = assess_blocking(&ctx, &record).await?;
    Ok(Json(assessment.into()))
}
