//! API error types with structured JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::classifier::ClassifierError;
use crate::form::FormError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Prediction failed: {0}")]
    Inference(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest(detail) => detail.clone(),
            ApiError::Inference(detail) => format!("Prediction failed: {detail}"),
            ApiError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Inference(detail) => {
                tracing::error!(detail, "Inference failed");
                "INFERENCE_FAILED"
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                "INTERNAL"
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message: self.user_message(),
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Inference(detail) => ApiError::Inference(detail),
            invalid @ ClassifierError::InvalidProbability(_) => {
                ApiError::Inference(invalid.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
