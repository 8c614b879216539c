//! Shared types for the HTTP layer.

use std::sync::Arc;

use serde::Serialize;

use crate::classifier::ReadmissionClassifier;
use crate::risk::{RiskAssessment, RiskTier};

// ═══════════════════════════════════════════════════════════
// App context — shared state for every route
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes.
///
/// Holds only the classifier, loaded once before the listener binds and
/// never replaced. Form values are request-scoped and never stored here.
#[derive(Clone)]
pub struct AppContext {
    pub classifier: Arc<dyn ReadmissionClassifier>,
}

impl AppContext {
    pub fn new(classifier: Arc<dyn ReadmissionClassifier>) -> Self {
        Self { classifier }
    }
}

// ═══════════════════════════════════════════════════════════
// Response bodies
// ═══════════════════════════════════════════════════════════

/// `POST /api/predict` response.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub probability: f64,
    pub percentage: String,
    pub tier: RiskTier,
    pub banner: &'static str,
}

impl From<RiskAssessment> for PredictionResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            probability: assessment.probability,
            percentage: assessment.percentage(),
            tier: assessment.tier,
            banner: assessment.banner(),
        }
    }
}
