//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Routes:
//! - `GET  /`            — form, idle state
//! - `POST /predict`     — form submission, result state
//! - `POST /api/predict` — JSON prediction
//! - `GET  /health`      — liveness

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::AppContext;
use crate::classifier::ReadmissionClassifier;

/// Build the application router around an already-loaded classifier.
pub fn app_router(classifier: Arc<dyn ReadmissionClassifier>) -> Router {
    build_router(AppContext::new(classifier))
}

fn build_router(ctx: AppContext) -> Router {
    let api = Router::new().route("/predict", post(endpoints::predict::predict));

    Router::new()
        .route("/", get(endpoints::form::index))
        .route("/predict", post(endpoints::form::submit))
        .route("/health", get(endpoints::health::check))
        .nest("/api", api)
        .with_state(ctx)
}
