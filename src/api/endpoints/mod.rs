//! HTTP endpoint handlers.
//!
//! The HTML form and the JSON endpoint share the same parsing and the same
//! Inference Adapter (`crate::predictor::assess`).

pub mod form;
pub mod health;
pub mod predict;

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::types::AppContext;
use crate::models::PatientRecord;
use crate::predictor;
use crate::risk::RiskAssessment;

/// Score a record on the blocking pool.
///
/// The ONNX backend holds its session lock for the whole evaluation, so
/// inference stays off the async workers.
pub(crate) async fn assess_blocking(
    ctx: &AppContext,
    record: &PatientRecord,
) -> Result<RiskAssessment, ApiError> {
    let classifier = Arc::clone(&ctx.classifier);
    let record = record.clone();

    tokio::task::spawn_blocking(move || predictor::assess(classifier.as_ref(), &record))
        .await
        .map_err(|e| ApiError::Internal(format!("Inference task failed: {e}")))?
        .map_err(ApiError::from)
}
